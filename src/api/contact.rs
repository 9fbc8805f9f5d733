//! Contact API endpoints
//!
//! Handles HTTP requests for contact inquiries:
//! - POST /api/v1/contact - Submit inquiry (public form)
//! - GET /api/v1/contact - List inquiries (admin inbox)
//! - POST /api/v1/contact/{id}/read - Mark inquiry read (admin)
//! - DELETE /api/v1/contact?id={id} - Delete inquiry (admin)
//!
//! Deletion takes the id as a query parameter rather than a path segment;
//! the admin inbox has always addressed inquiries that way.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::common::{default_inbox_limit, AckResponse, ListQuery};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{ContactInquiry, CursorPage};
use crate::validate::ContactPayload;

/// Query parameters for inquiry deletion
#[derive(Debug, Deserialize)]
pub struct DeleteInquiryQuery {
    pub id: Option<String>,
}

/// POST /api/v1/contact - Submit new inquiry
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> Result<(StatusCode, Json<AckResponse>), ApiError> {
    state.contact_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(AckResponse::ok())))
}

/// GET /api/v1/contact - List inquiries for the admin inbox
pub async fn list_inquiries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CursorPage<ContactInquiry>>, ApiError> {
    let page = state
        .contact_service
        .list(query.cursor(default_inbox_limit()))
        .await?;
    Ok(Json(page))
}

/// POST /api/v1/contact/{id}/read - Mark inquiry read
pub async fn mark_inquiry_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    state.contact_service.mark_read(&id).await?;
    Ok(Json(AckResponse::ok()))
}

/// DELETE /api/v1/contact?id={id} - Delete inquiry
pub async fn delete_inquiry(
    State(state): State<AppState>,
    Query(query): Query<DeleteInquiryQuery>,
) -> Result<Json<AckResponse>, ApiError> {
    let id = query
        .id
        .ok_or_else(|| ApiError::bad_request("ID required"))?;
    state.contact_service.delete(&id).await?;
    Ok(Json(AckResponse::ok()))
}
