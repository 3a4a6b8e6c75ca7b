//! # Jotter Infrastructure
//!
//! Concrete implementations of the post store port defined in `jotter-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use memory::InMemoryPostRepository;

// Re-exports - PostgreSQL
pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
