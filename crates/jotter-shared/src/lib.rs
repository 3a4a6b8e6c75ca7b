//! # Jotter Shared
//!
//! Wire types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::DeletedPost;
pub use response::ErrorResponse;
