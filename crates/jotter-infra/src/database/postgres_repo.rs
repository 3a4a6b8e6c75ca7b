//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbBackend, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, Statement,
};

use jotter_core::domain::{Post, PostSummary};
use jotter_core::error::RepoError;
use jotter_core::normalize::{CanonicalPost, LatestCount};
use jotter_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_latest(&self, count: LatestCount) -> Result<Vec<PostSummary>, RepoError> {
        let rows = PostEntity::find()
            .select_only()
            .columns([
                post::Column::Id,
                post::Column::Slug,
                post::Column::Title,
                post::Column::Excerpt,
                post::Column::Tags,
                post::Column::State,
                post::Column::ReadingTime,
                post::Column::CreatedAt,
            ])
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(count.get())
            .into_model::<post::SummaryRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(PostSummary::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        models.into_iter().map(Post::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding post by id");

        PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Post::try_from)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Post::try_from)
            .transpose()
    }

    async fn create(&self, post: CanonicalPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Post::try_from(model)
    }

    async fn delete(&self, id: i64) -> Result<Option<Post>, RepoError> {
        // Single round-trip: the deleted row comes back through RETURNING.
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM posts WHERE id = $1 RETURNING *",
            [id.into()],
        );

        PostEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Post::try_from)
            .transpose()
    }
}
