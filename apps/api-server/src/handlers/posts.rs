//! Post handlers.

use actix_web::{HttpResponse, web};

use jotter_core::normalize::RawPost;
use jotter_shared::DeletedPost;

use crate::middleware::api_key::Admin;
use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

/// GET /posts/latest/{count}
pub async fn list_latest(
    state: web::Data<AppState>,
    count: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.latest(&count).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts
pub async fn list_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{key} - `key` is a numeric id or a slug.
pub async fn get_post(
    state: web::Data<AppState>,
    key: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&key).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /posts - Protected route
pub async fn create_post(
    _admin: Admin,
    request_id: RequestId,
    state: web::Data<AppState>,
    body: web::Json<RawPost>,
) -> AppResult<HttpResponse> {
    tracing::debug!(request_id = %request_id.as_str(), "Creating post");

    let post = state.posts.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// DELETE /posts/{id} - Protected route
pub async fn delete_post(
    _admin: Admin,
    request_id: RequestId,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    tracing::debug!(request_id = %request_id.as_str(), post_id = %id, "Deleting post");

    let post = state.posts.delete(&id).await?;
    Ok(HttpResponse::Ok().json(DeletedPost::new(post)))
}
