//! In-memory storage - used when no database is configured, and in tests.

mod posts;

pub use posts::InMemoryPostRepository;
