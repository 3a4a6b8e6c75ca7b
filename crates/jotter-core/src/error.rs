//! Domain-level error types.

use thiserror::Error;

/// Client input errors, raised before any storage call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required and must be a non-empty string")]
    MissingField(&'static str),

    #[error("state must be draft or published, got {0}")]
    InvalidState(String),

    #[error("{0}")]
    InvalidArgument(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Errors returned by [`crate::PostService`].
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity_type} {key} not found")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl DomainError {
    pub(crate) fn post_not_found(key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "post",
            key: key.into(),
        }
    }
}
