//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, NotSet, Set};

use jotter_core::domain::{Post, PostSummary};
use jotter_core::error::RepoError;
use jotter_core::normalize::CanonicalPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text", unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    #[sea_orm(column_type = "Text")]
    pub state: String,
    #[sea_orm(column_type = "Text")]
    pub reading_time: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row shape of the latest-posts listing; `content` is never selected.
#[derive(Debug, FromQueryResult)]
pub struct SummaryRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub tags: Json,
    pub state: String,
    pub reading_time: String,
    pub created_at: DateTimeWithTimeZone,
}

fn tags_from_json(tags: Json) -> Vec<Json> {
    match tags {
        Json::Array(tags) => tags,
        _ => Vec::new(),
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            tags: tags_from_json(model.tags),
            state: model
                .state
                .parse()
                .map_err(|e| RepoError::Query(format!("post {}: {e}", model.id)))?,
            reading_time: model.reading_time,
            created_at: model.created_at.into(),
        })
    }
}

impl TryFrom<SummaryRow> for PostSummary {
    type Error = RepoError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            tags: tags_from_json(row.tags),
            state: row
                .state
                .parse()
                .map_err(|e| RepoError::Query(format!("post {}: {e}", row.id)))?,
            reading_time: row.reading_time,
            created_at: row.created_at.into(),
        })
    }
}

/// Conversion from a canonical post to an insertable ActiveModel.
/// `id` and `created_at` are left to the database.
impl From<CanonicalPost> for ActiveModel {
    fn from(post: CanonicalPost) -> Self {
        Self {
            id: NotSet,
            slug: Set(post.slug),
            title: Set(post.title),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            tags: Set(Json::Array(post.tags.into_tags())),
            state: Set(post.state.as_str().to_string()),
            reading_time: Set(post.reading_time),
            created_at: NotSet,
        }
    }
}
