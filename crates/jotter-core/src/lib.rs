//! # Jotter Core
//!
//! The domain layer of the Jotter post store.
//! This crate contains the post model, the creation-input normalizer and the
//! storage port, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ValidationError};
pub use service::PostService;
