//! Film API endpoints
//!
//! Handles HTTP requests for film management:
//! - GET /api/v1/films - List films with cursor pagination
//! - GET /api/v1/films/{id} - Get film by id
//! - POST /api/v1/films - Create new film (admin)
//! - PUT /api/v1/films/{id} - Replace film (admin)
//! - DELETE /api/v1/films/{id} - Delete film (admin)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::common::{default_list_limit, AckResponse, CreatedResponse, ListQuery};
use crate::api::middleware::{ApiError, AppState, MaybeAdmin};
use crate::models::{CursorPage, Film};
use crate::validate::FilmPayload;

/// GET /api/v1/films - List films with cursor pagination
pub async fn list_films(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<CursorPage<Film>>, ApiError> {
    let published_only = query.published_only(is_admin)?;
    let page = state
        .film_service
        .list(published_only, query.cursor(default_list_limit()))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/films/{id} - Get film by id
pub async fn get_film(
    State(state): State<AppState>,
    MaybeAdmin(is_admin): MaybeAdmin,
    Path(id): Path<String>,
) -> Result<Json<Film>, ApiError> {
    let film = state
        .film_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Film not found: {id}")))?;

    if !film.published && !is_admin {
        return Err(ApiError::not_found(format!("Film not found: {id}")));
    }

    Ok(Json(film))
}

/// POST /api/v1/films - Create new film
pub async fn create_film(
    State(state): State<AppState>,
    Json(payload): Json<FilmPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let film = state.film_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: film.id })))
}

/// PUT /api/v1/films/{id} - Replace film
pub async fn update_film(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FilmPayload>,
) -> Result<Json<Film>, ApiError> {
    let film = state.film_service.update(&id, payload).await?;
    Ok(Json(film))
}

/// DELETE /api/v1/films/{id} - Delete film
pub async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.film_service.delete(&id).await?;
    Ok(Json(AckResponse::ok()))
}
