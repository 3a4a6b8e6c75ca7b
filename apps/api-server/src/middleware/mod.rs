//! Middleware modules.

pub mod api_key;
pub mod cors;
pub mod error;
