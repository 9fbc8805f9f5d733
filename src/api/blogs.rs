//! Blog API endpoints
//!
//! Handles HTTP requests for blog management:
//! - GET /api/v1/blogs - List posts with cursor pagination
//! - GET /api/v1/blogs/{id} - Get post by id
//! - POST /api/v1/blogs - Create new post (admin)
//! - PUT /api/v1/blogs/{id} - Replace post (admin)
//! - DELETE /api/v1/blogs/{id} - Delete post (admin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::common::{default_list_limit, AckResponse, CreatedResponse, ListQuery};
use crate::api::middleware::{ApiError, AppState, MaybeAdmin};
use crate::models::{BlogPost, CursorPage};
use crate::validate::BlogPayload;

/// GET /api/v1/blogs - List posts with cursor pagination
pub async fn list_blogs(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<CursorPage<BlogPost>>, ApiError> {
    let published_only = query.published_only(is_admin)?;
    let page = state
        .blog_service
        .list(published_only, query.cursor(default_list_limit()))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/blogs/{id} - Get post by id
///
/// Drafts return 404 unless the caller holds the admin token, so unpublished
/// work never leaks through an id guess.
pub async fn get_blog(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = state
        .blog_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Blog post not found: {id}")))?;

    if !post.published && !is_admin {
        return Err(ApiError::not_found(format!("Blog post not found: {id}")));
    }

    Ok(Json(post))
}

/// POST /api/v1/blogs - Create new post
pub async fn create_blog(
    State(state): State<AppState>,
    Json(payload): Json<BlogPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let post = state.blog_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: post.id })))
}

/// PUT /api/v1/blogs/{id} - Replace post
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<BlogPost>, ApiError> {
    let post = state.blog_service.update(&id, payload).await?;
    Ok(Json(post))
}

/// DELETE /api/v1/blogs/{id} - Delete post
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.blog_service.delete(&id).await?;
    Ok(Json(AckResponse::ok()))
}
