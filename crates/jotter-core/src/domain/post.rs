use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostState {
    #[default]
    Draft,
    Published,
}

impl PostState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostState::Draft => "draft",
            PostState::Published => "published",
        }
    }
}

impl fmt::Display for PostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or submitted state is outside {draft, published}.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post state: {0}")]
pub struct UnknownPostState(pub String);

impl FromStr for PostState {
    type Err = UnknownPostState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostState::Draft),
            "published" => Ok(PostState::Published),
            other => Err(UnknownPostState(other.to_string())),
        }
    }
}

/// Post entity - a stored blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub tags: Vec<Value>,
    pub state: PostState,
    pub reading_time: String,
    pub created_at: DateTime<Utc>,
}

/// Listing projection of a post, without its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub tags: Vec<Value>,
    pub state: PostState,
    pub reading_time: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            tags: post.tags,
            state: post.state,
            reading_time: post.reading_time,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_str() {
        assert_eq!("draft".parse::<PostState>(), Ok(PostState::Draft));
        assert_eq!("published".parse::<PostState>(), Ok(PostState::Published));
        assert_eq!(PostState::Published.to_string(), "published");
        assert!("Published".parse::<PostState>().is_err());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&PostState::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
    }
}
