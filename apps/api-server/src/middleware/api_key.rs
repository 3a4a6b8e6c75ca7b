//! Shared-secret authentication for write routes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::fmt;
use std::future::{Ready, ready};
use std::sync::Arc;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Header carrying the admin secret.
pub static API_KEY_HEADER: &str = "X-API-KEY";

/// The configured admin secret. Never printed.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::from(key.into()))
    }

    /// Compare without short-circuiting on the first differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();

        expected.len() == candidate.len()
            && expected
                .iter()
                .zip(candidate)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Extractor that only succeeds when the request carries the admin key.
///
/// ```ignore
/// async fn protected_route(_admin: Admin) -> impl Responder {
///     "only with X-API-KEY"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                tracing::error!("AppState not found in app data");
                return ready(Err(AppError::Unauthorized));
            }
        };

        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(key) if state.api_key.matches(key) => ready(Ok(Admin)),
            Some(_) => {
                tracing::warn!(path = %req.path(), "Rejected request with wrong API key");
                ready(Err(AppError::Unauthorized))
            }
            None => ready(Err(AppError::Unauthorized)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        let key = ApiKey::new("s3cret");
        assert!(key.matches("s3cret"));
        assert!(!key.matches("s3cre"));
        assert!(!key.matches("s3creT"));
        assert!(!key.matches(""));
    }

    #[test]
    fn test_debug_hides_secret() {
        assert_eq!(format!("{:?}", ApiKey::new("s3cret")), "ApiKey(***)");
    }
}
