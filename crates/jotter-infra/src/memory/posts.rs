//! In-memory post repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use jotter_core::domain::{Post, PostSummary};
use jotter_core::error::RepoError;
use jotter_core::normalize::{CanonicalPost, LatestCount};
use jotter_core::ports::PostRepository;

struct Store {
    next_id: i64,
    posts: Vec<Post>,
}

impl Store {
    fn newest_first(&self) -> Vec<Post> {
        let mut posts = self.posts.clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        posts
    }
}

/// In-memory post store using a Vec behind an async RwLock.
///
/// Slugs are kept unique, mirroring the unique index of the SQL schema.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start from existing posts. New ids continue after the highest one given.
    pub fn seeded(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            store: RwLock::new(Store { next_id, posts }),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_latest(&self, count: LatestCount) -> Result<Vec<PostSummary>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .newest_first()
            .into_iter()
            .take(count.get() as usize)
            .map(PostSummary::from)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.newest_first())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create(&self, post: CanonicalPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.posts.iter().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint on slug \"{}\"",
                post.slug
            )));
        }

        let id = store.next_id;
        store.next_id += 1;

        let stored = Post {
            id,
            slug: post.slug,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            tags: post.tags.into_tags(),
            state: post.state,
            reading_time: post.reading_time,
            created_at: Utc::now(),
        };
        store.posts.push(stored.clone());

        Ok(stored)
    }

    async fn delete(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let index = store.posts.iter().position(|p| p.id == id);
        Ok(index.map(|i| store.posts.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use jotter_core::domain::PostState;
    use jotter_core::normalize::{RawPost, normalize};
    use serde_json::json;

    use super::*;

    fn canonical(slug: &str) -> CanonicalPost {
        let raw: RawPost = serde_json::from_value(json!({
            "slug": slug,
            "title": format!("Title {slug}"),
            "content": "some words here",
            "tags": "[\"a\"]"
        }))
        .unwrap();
        normalize(raw).unwrap()
    }

    fn post_at(id: i64, slug: &str, minutes: i64) -> Post {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Post {
            id,
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            content: "body".to_string(),
            excerpt: None,
            tags: vec![],
            state: PostState::Published,
            reading_time: "1 min read".to_string(),
            created_at: base + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let repo = InMemoryPostRepository::new();
        let first = repo.create(canonical("one")).await.unwrap();
        let second = repo.create(canonical("two")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.tags, vec![json!("a")]);
        assert_eq!(second.state, PostState::Draft);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let repo = InMemoryPostRepository::new();
        repo.create(canonical("same")).await.unwrap();

        let err = repo.create(canonical("same")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_latest_is_newest_first() {
        let repo = InMemoryPostRepository::seeded(vec![
            post_at(1, "old", 0),
            post_at(2, "newest", 30),
            post_at(3, "middle", 10),
            post_at(4, "older", 5),
        ]);

        let latest = repo.list_latest(LatestCount::new(3).unwrap()).await.unwrap();
        let slugs: Vec<_> = latest.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newest", "middle", "older"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_break_ties_by_id() {
        let repo = InMemoryPostRepository::seeded(vec![post_at(1, "a", 0), post_at(2, "b", 0)]);
        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].id, 2);
        assert_eq!(all[1].id, 1);
    }

    #[tokio::test]
    async fn test_seeded_ids_continue() {
        let repo = InMemoryPostRepository::seeded(vec![post_at(41, "x", 0)]);
        let created = repo.create(canonical("y")).await.unwrap();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryPostRepository::seeded(vec![post_at(1, "gone", 0)]);

        let deleted = repo.delete(1).await.unwrap();
        assert_eq!(deleted.map(|p| p.slug), Some("gone".to_string()));
        assert!(repo.is_empty().await);
        assert!(repo.delete(1).await.unwrap().is_none());
    }
}
