//! Post service - runs the normalizer in front of the store gateway.

use std::sync::Arc;

use crate::domain::{Post, PostSummary};
use crate::error::DomainError;
use crate::normalize::{self, LatestCount, PostKey, RawPost};
use crate::ports::PostRepository;

/// Entry point for every post operation exposed over HTTP.
///
/// All validation happens here, before the repository is touched.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn latest(&self, raw_count: &str) -> Result<Vec<PostSummary>, DomainError> {
        let count = LatestCount::parse(raw_count)?;
        Ok(self.repo.list_latest(count).await?)
    }

    pub async fn all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn get(&self, key: &str) -> Result<Post, DomainError> {
        self.repo
            .find_by_id_or_slug(key)
            .await?
            .ok_or_else(|| DomainError::post_not_found(key))
    }

    pub async fn create(&self, raw: RawPost) -> Result<Post, DomainError> {
        let canonical = normalize::normalize(raw)?;

        if let Some(reason) = canonical.tags.fallback() {
            tracing::debug!(slug = %canonical.slug, ?reason, "Tags replaced by empty list");
        }

        let post = self.repo.create(canonical).await?;
        tracing::info!(post_id = post.id, slug = %post.slug, "Post created");
        Ok(post)
    }

    /// Delete by numeric id. Text that is not an integer names no post.
    pub async fn delete(&self, raw_id: &str) -> Result<Post, DomainError> {
        let PostKey::Id(id) = PostKey::parse(raw_id) else {
            return Err(DomainError::post_not_found(raw_id));
        };

        let post = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(raw_id))?;
        tracing::info!(post_id = post.id, slug = %post.slug, "Post deleted");
        Ok(post)
    }
}
