//! Cross-origin resource sharing.

use actix_cors::Cors;

/// Build the CORS layer for one worker.
///
/// With no configured origins every origin is allowed. Otherwise only the
/// listed origins get CORS headers back.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin().send_wildcard()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::{
        ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
    };
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    macro_rules! app {
        ($origins:expr) => {
            test::init_service(
                App::new()
                    .wrap(cors($origins))
                    .route("/posts", web::get().to(|| async { HttpResponse::Ok().finish() }))
                    .route(
                        "/posts",
                        web::post().to(|| async { HttpResponse::Created().finish() }),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_preflight_allows_any_origin_by_default() {
        let app = app!(&[]);

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/posts")
            .insert_header((ORIGIN, "https://blog.example.com"))
            .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert!(resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn test_configured_origin_is_echoed() {
        let origins = vec!["https://admin.example.com".to_string()];
        let app = app!(&origins);

        let req = test::TestRequest::get()
            .uri("/posts")
            .insert_header((ORIGIN, "https://admin.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let allowed = resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap();
        assert_eq!(allowed.to_str().unwrap(), "https://admin.example.com");
    }
}
