//! Photography API endpoints
//!
//! Handles HTTP requests for album management:
//! - GET /api/v1/photography - List albums with cursor pagination
//! - GET /api/v1/photography/{id} - Get album by id
//! - POST /api/v1/photography - Create new album (admin)
//! - PUT /api/v1/photography/{id} - Replace album (admin)
//! - DELETE /api/v1/photography/{id} - Delete album (admin)
//!
//! The public site drives its infinite-scroll grid from the list endpoint,
//! fetching the next page when the sentinel row scrolls into view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::common::{default_grid_limit, AckResponse, CreatedResponse, ListQuery};
use crate::api::middleware::{ApiError, AppState, MaybeAdmin};
use crate::models::{CursorPage, PhotoAlbum};
use crate::validate::PhotoAlbumPayload;

/// GET /api/v1/photography - List albums with cursor pagination
pub async fn list_albums(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<CursorPage<PhotoAlbum>>, ApiError> {
    let published_only = query.published_only(is_admin)?;
    let page = state
        .photography_service
        .list(published_only, query.cursor(default_grid_limit()))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/photography/{id} - Get album by id
pub async fn get_album(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Path(id): Path<String>,
) -> Result<Json<PhotoAlbum>, ApiError> {
    let album = state
        .photography_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Album not found: {id}")))?;

    if !album.published && !is_admin {
        return Err(ApiError::not_found(format!("Album not found: {id}")));
    }

    Ok(Json(album))
}

/// POST /api/v1/photography - Create new album
pub async fn create_album(
    State(state): State<AppState>,
    Json(payload): Json<PhotoAlbumPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let album = state.photography_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: album.id })))
}

/// PUT /api/v1/photography/{id} - Replace album
pub async fn update_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PhotoAlbumPayload>,
) -> Result<Json<PhotoAlbum>, ApiError> {
    let album = state.photography_service.update(&id, payload).await?;
    Ok(Json(album))
}

/// DELETE /api/v1/photography/{id} - Delete album
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.photography_service.delete(&id).await?;
    Ok(Json(AckResponse::ok()))
}
