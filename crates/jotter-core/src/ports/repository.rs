use async_trait::async_trait;

use crate::domain::{Post, PostSummary};
use crate::error::RepoError;
use crate::normalize::{CanonicalPost, LatestCount, PostKey};

/// Post store gateway - the only component that reads or writes posts.
///
/// Listings are ordered newest first by `created_at`, ties broken by `id`
/// descending.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// The `count` most recent posts, without content.
    async fn list_latest(&self, count: LatestCount) -> Result<Vec<PostSummary>, RepoError>;

    /// Every post, full shape.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a canonical post. The store assigns `id` and `created_at`.
    async fn create(&self, post: CanonicalPost) -> Result<Post, RepoError>;

    /// Hard-delete a post, returning the removed row.
    async fn delete(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Look a post up by id when `key` is an integer, falling back to slug
    /// when it is not or when no post has that id.
    async fn find_by_id_or_slug(&self, key: &str) -> Result<Option<Post>, RepoError> {
        if let PostKey::Id(id) = PostKey::parse(key) {
            if let Some(post) = self.find_by_id(id).await? {
                return Ok(Some(post));
            }
        }
        self.find_by_slug(key).await
    }
}
