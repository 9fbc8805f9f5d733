//! Editorial API endpoints
//!
//! Handles HTTP requests for editorial image management:
//! - GET /api/v1/editorial - List images with cursor pagination
//! - GET /api/v1/editorial/{id} - Get image by id
//! - POST /api/v1/editorial - Create new image (admin)
//! - PUT /api/v1/editorial/{id} - Replace image (admin)
//! - DELETE /api/v1/editorial/{id} - Delete image (admin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::common::{default_grid_limit, AckResponse, CreatedResponse, ListQuery};
use crate::api::middleware::{ApiError, AppState, MaybeAdmin};
use crate::models::{CursorPage, EditorialImage};
use crate::validate::EditorialPayload;

/// GET /api/v1/editorial - List images with cursor pagination
pub async fn list_images(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<CursorPage<EditorialImage>>, ApiError> {
    let published_only = query.published_only(is_admin)?;
    let page = state
        .editorial_service
        .list(published_only, query.cursor(default_grid_limit()))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/editorial/{id} - Get image by id
pub async fn get_image(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Path(id): Path<String>,
) -> Result<Json<EditorialImage>, ApiError> {
    let image = state
        .editorial_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Editorial image not found: {id}")))?;

    if !image.published && !is_admin {
        return Err(ApiError::not_found(format!(
            "Editorial image not found: {id}"
        )));
    }

    Ok(Json(image))
}

/// POST /api/v1/editorial - Create new image
pub async fn create_image(
    State(state): State<AppState>,
    Json(payload): Json<EditorialPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let image = state.editorial_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: image.id })))
}

/// PUT /api/v1/editorial/{id} - Replace image
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EditorialPayload>,
) -> Result<Json<EditorialImage>, ApiError> {
    let image = state.editorial_service.update(&id, payload).await?;
    Ok(Json(image))
}

/// DELETE /api/v1/editorial/{id} - Delete image
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.editorial_service.delete(&id).await?;
    Ok(Json(AckResponse::ok()))
}
