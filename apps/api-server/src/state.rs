//! Application state - shared across all handlers.

use std::sync::Arc;

use jotter_core::PostService;
use jotter_core::ports::PostRepository;
use jotter_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use jotter_infra::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;
use crate::middleware::api_key::ApiKey;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub api_key: ApiKey,
}

impl AppState {
    pub fn new(repo: Arc<dyn PostRepository>, api_key: ApiKey) -> Self {
        Self {
            posts: PostService::new(repo),
            api_key,
        }
    }
}

/// The post store chosen at startup, owning its connection pool if any.
pub struct PostStore {
    repo: Arc<dyn PostRepository>,
    #[cfg(feature = "postgres")]
    db: Option<DatabaseConnections>,
}

impl PostStore {
    pub fn in_memory() -> Self {
        Self {
            repo: Arc::new(InMemoryPostRepository::new()),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Open the store described by `config`.
    ///
    /// With `DATABASE_URL` set, a connection failure or failed migration is
    /// fatal. Without it, posts live in memory for the life of the process.
    #[cfg(feature = "postgres")]
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        let connections = DatabaseConnections::init(db_config).await?;

        if config.run_migrations {
            Migrator::up(&connections.main, None).await?;
            tracing::info!("Database schema up to date");
        }

        Ok(Self {
            repo: Arc::new(PostgresPostRepository::new(connections.main.clone())),
            db: Some(connections),
        })
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Self::in_memory())
    }

    pub fn repository(&self) -> Arc<dyn PostRepository> {
        self.repo.clone()
    }

    /// Release the connection pool.
    #[cfg(feature = "postgres")]
    pub async fn close(self) -> anyhow::Result<()> {
        let Self { repo, db } = self;
        drop(repo);
        if let Some(db) = db {
            db.close().await?;
        }
        Ok(())
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn close(self) -> anyhow::Result<()> {
        Ok(())
    }
}
