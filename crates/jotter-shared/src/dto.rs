//! Data Transfer Objects - response envelopes for the post API.

use serde::{Deserialize, Serialize};

/// Body returned by `DELETE /posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPost<T> {
    pub message: String,
    pub post: T,
}

impl<T> DeletedPost<T> {
    pub fn new(post: T) -> Self {
        Self {
            message: "deleted".to_string(),
            post,
        }
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
