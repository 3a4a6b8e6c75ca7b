//! Request normalizer - turns loosely-typed creation input into a canonical post.
//!
//! Everything here is a pure function of its input. Validation failures are
//! reported as [`ValidationError`]; malformed tag input is never a failure and
//! degrades to an empty tag list through [`TagResolution::EmptyFallback`].

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{PostState, UnknownPostState};
use crate::error::ValidationError;

/// Reading speed used for the derived `reading_time` field.
pub const WORDS_PER_MINUTE: usize = 200;

/// Raw creation input as received from a client.
///
/// Every field is an arbitrary JSON value; `null` deserializes as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub slug: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub excerpt: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
}

/// A validated post ready to be persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPost {
    pub slug: String,
    pub title: String,
    /// Content with escaped newline sequences already expanded.
    pub content: String,
    pub excerpt: Option<String>,
    pub tags: TagResolution,
    pub state: PostState,
    pub reading_time: String,
}

/// Outcome of tag coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum TagResolution {
    /// Tags were given as an array, or as a string holding a JSON array.
    Parsed(Vec<Value>),
    /// Tags could not be used and were replaced by an empty list.
    EmptyFallback(TagFallback),
}

/// Why tag input fell back to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFallback {
    Absent,
    /// The string was not valid JSON.
    Malformed(String),
    /// The string was valid JSON but not an array.
    NotAnArray,
    /// Neither an array nor a string.
    UnsupportedType,
}

impl TagResolution {
    pub fn resolve(value: Option<Value>) -> Self {
        match value {
            None => TagResolution::EmptyFallback(TagFallback::Absent),
            Some(Value::Array(tags)) => TagResolution::Parsed(tags),
            Some(Value::String(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Array(tags)) => TagResolution::Parsed(tags),
                Ok(_) => TagResolution::EmptyFallback(TagFallback::NotAnArray),
                Err(e) => TagResolution::EmptyFallback(TagFallback::Malformed(e.to_string())),
            },
            Some(_) => TagResolution::EmptyFallback(TagFallback::UnsupportedType),
        }
    }

    pub fn fallback(&self) -> Option<&TagFallback> {
        match self {
            TagResolution::Parsed(_) => None,
            TagResolution::EmptyFallback(reason) => Some(reason),
        }
    }

    pub fn as_slice(&self) -> &[Value] {
        match self {
            TagResolution::Parsed(tags) => tags,
            TagResolution::EmptyFallback(_) => &[],
        }
    }

    pub fn into_tags(self) -> Vec<Value> {
        match self {
            TagResolution::Parsed(tags) => tags,
            TagResolution::EmptyFallback(_) => Vec::new(),
        }
    }
}

/// Validate and canonicalize creation input.
pub fn normalize(raw: RawPost) -> Result<CanonicalPost, ValidationError> {
    let slug = required_string(raw.slug, "slug")?;
    let title = required_string(raw.title, "title")?;
    let content = required_string(raw.content, "content")?;
    let state = resolve_state(raw.state)?;
    let excerpt = resolve_excerpt(raw.excerpt);
    let tags = TagResolution::resolve(raw.tags);

    let content = normalize_content(&content);
    let reading_time = reading_time(&content);

    Ok(CanonicalPost {
        slug,
        title,
        content,
        excerpt,
        tags,
        state,
        reading_time,
    })
}

/// Replace literal `\r\n` and `\n` escape text with real line breaks.
pub fn normalize_content(raw: &str) -> String {
    raw.replace("\\r\\n", "\n").replace("\\n", "\n")
}

/// Format the reading time of `content` as `"<N> min read"`.
///
/// Rounds up to whole minutes and never reports less than one minute.
pub fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

fn required_string(value: Option<Value>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn resolve_state(value: Option<Value>) -> Result<PostState, ValidationError> {
    match value {
        None => Ok(PostState::default()),
        Some(Value::String(s)) if s.is_empty() => Ok(PostState::default()),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|UnknownPostState(s)| ValidationError::InvalidState(s)),
        Some(other) => Err(ValidationError::InvalidState(other.to_string())),
    }
}

/// Falsy input (`""`, `false`, `0`) is absent; other JSON is kept as its text.
fn resolve_excerpt(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Number of posts requested from the latest-posts listing. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestCount(u64);

impl LatestCount {
    pub fn new(count: u64) -> Result<Self, ValidationError> {
        if count == 0 {
            return Err(invalid_count());
        }
        Ok(Self(count))
    }

    /// Parse a count from a path segment such as `"3"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let count: i64 = raw.trim().parse().map_err(|_| invalid_count())?;
        if count < 1 {
            return Err(invalid_count());
        }
        Self::new(count as u64)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

fn invalid_count() -> ValidationError {
    ValidationError::InvalidArgument("count must be a positive number".to_string())
}

/// A single path parameter that names a post either by id or by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKey<'a> {
    /// The text parsed as an integer. It may still be a slug made of digits.
    Id(i64),
    Slug(&'a str),
}

impl<'a> PostKey<'a> {
    /// Only the canonical spelling of an integer is an id: `"+7"` and
    /// `"007"` are slugs.
    pub fn parse(key: &'a str) -> Self {
        match key.parse::<i64>().ok().filter(|id| id.to_string() == key) {
            Some(id) => PostKey::Id(id),
            None => PostKey::Slug(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_post_defaults_to_draft() {
        let post = normalize(raw(json!({
            "slug": "hi",
            "title": "Hi",
            "content": "one two three"
        })))
        .unwrap();

        assert_eq!(post.state, PostState::Draft);
        assert_eq!(post.excerpt, None);
        assert_eq!(post.tags, TagResolution::EmptyFallback(TagFallback::Absent));
        assert_eq!(post.reading_time, "1 min read");
    }

    #[test]
    fn test_missing_or_empty_required_fields() {
        let err = normalize(raw(json!({"title": "T", "content": "c"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("slug"));

        let err = normalize(raw(json!({"slug": "s", "title": "", "content": "c"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title"));

        let err =
            normalize(raw(json!({"slug": "s", "title": "T", "content": null}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("content"));

        let err = normalize(raw(json!({"slug": 7, "title": "T", "content": "c"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("slug"));
    }

    #[test]
    fn test_state_validation() {
        let base = json!({"slug": "s", "title": "T", "content": "c"});

        let mut published = base.clone();
        published["state"] = json!("published");
        assert_eq!(normalize(raw(published)).unwrap().state, PostState::Published);

        let mut archived = base.clone();
        archived["state"] = json!("archived");
        assert_eq!(
            normalize(raw(archived)).unwrap_err(),
            ValidationError::InvalidState("archived".to_string())
        );

        let mut numeric = base;
        numeric["state"] = json!(1);
        assert!(matches!(
            normalize(raw(numeric)),
            Err(ValidationError::InvalidState(_))
        ));
    }

    #[test]
    fn test_excerpt_passthrough() {
        let post = normalize(raw(json!({
            "slug": "s", "title": "T", "content": "c", "excerpt": "  short  "
        })))
        .unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("  short  "));

        let post = normalize(raw(json!({
            "slug": "s", "title": "T", "content": "c", "excerpt": 12
        })))
        .unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("12"));

        let post = normalize(raw(json!({
            "slug": "s", "title": "T", "content": "c", "excerpt": ["x"]
        })))
        .unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("[\"x\"]"));

        for falsy in [json!(""), json!(false), json!(0)] {
            let post = normalize(raw(json!({
                "slug": "s", "title": "T", "content": "c", "excerpt": falsy
            })))
            .unwrap();
            assert_eq!(post.excerpt, None);
        }
    }

    #[test]
    fn test_tags_from_array_and_string() {
        assert_eq!(
            TagResolution::resolve(Some(json!(["rust", 2]))),
            TagResolution::Parsed(vec![json!("rust"), json!(2)])
        );
        assert_eq!(
            TagResolution::resolve(Some(json!("[1,2,3]"))).into_tags(),
            vec![json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn test_tags_fall_back_to_empty() {
        let malformed = TagResolution::resolve(Some(json!("not json")));
        assert!(matches!(
            malformed.fallback(),
            Some(TagFallback::Malformed(_))
        ));
        assert!(malformed.into_tags().is_empty());

        assert_eq!(
            TagResolution::resolve(Some(json!("{\"a\":1}"))),
            TagResolution::EmptyFallback(TagFallback::NotAnArray)
        );
        assert_eq!(
            TagResolution::resolve(Some(json!(42))),
            TagResolution::EmptyFallback(TagFallback::UnsupportedType)
        );
        assert!(TagResolution::resolve(None).as_slice().is_empty());
    }

    #[test]
    fn test_content_escapes_become_line_breaks() {
        assert_eq!(normalize_content("a\\nb"), "a\nb");
        assert_eq!(normalize_content("a\\r\\nb"), "a\nb");
        assert_eq!(normalize_content("a\\rb"), "a\\rb");

        let post = normalize(raw(json!({
            "slug": "s", "title": "T", "content": "line one\\nline two"
        })))
        .unwrap();
        assert_eq!(post.content, "line one\nline two");
    }

    #[test]
    fn test_content_normalization_is_idempotent_on_real_newlines() {
        let once = normalize_content("first\nsecond\r\nthird");
        assert_eq!(once, "first\nsecond\r\nthird");
        assert_eq!(normalize_content(&once), once);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time("one two three"), "1 min read");
        assert_eq!(reading_time(&vec!["word"; 200].join(" ")), "1 min read");
        assert_eq!(reading_time(&vec!["word"; 401].join(" ")), "3 min read");
    }

    #[test]
    fn test_reading_time_floors_at_one_minute() {
        assert_eq!(reading_time(""), "1 min read");
        assert_eq!(reading_time(" \n\t "), "1 min read");
    }

    #[test]
    fn test_reading_time_uses_normalized_content() {
        // the last word and "extra" only split once the escape is expanded
        let words = vec!["w"; 200].join(" ");
        let post = normalize(raw(json!({
            "slug": "s", "title": "T", "content": format!("{words}\\nextra")
        })))
        .unwrap();
        assert_eq!(post.reading_time, "2 min read");
    }

    #[test]
    fn test_latest_count() {
        assert_eq!(LatestCount::parse("3").unwrap().get(), 3);
        assert!(LatestCount::parse("0").is_err());
        assert!(LatestCount::parse("-1").is_err());
        assert!(LatestCount::parse("three").is_err());
        assert!(LatestCount::new(0).is_err());
    }

    #[test]
    fn test_post_key() {
        assert_eq!(PostKey::parse("42"), PostKey::Id(42));
        assert_eq!(PostKey::parse("-3"), PostKey::Id(-3));
        assert_eq!(PostKey::parse("hello-world"), PostKey::Slug("hello-world"));
        assert_eq!(PostKey::parse("+7"), PostKey::Slug("+7"));
        assert_eq!(PostKey::parse("007"), PostKey::Slug("007"));
    }
}
