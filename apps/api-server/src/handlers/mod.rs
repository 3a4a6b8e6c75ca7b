//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                // Public routes
                .route("", web::get().to(posts::list_all))
                .route("/latest/{count}", web::get().to(posts::list_latest))
                .route("/{key}", web::get().to(posts::get_post))
                // Admin routes
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        );
}

/// JSON body settings: malformed bodies become RFC 7807 400 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
