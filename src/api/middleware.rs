//! API middleware
//!
//! Contains:
//! - `AppState`, the dependency-injected services shared by all handlers
//! - `ApiError`, the wire shape for every failure response
//! - Admin bearer-token middleware (the backend serves a single admin whose
//!   token comes from configuration)

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::config::UploadConfig;
use crate::imagehost::DynImageHost;
use crate::services::{
    BlogService, ContactService, ContentError, EditorialService, FilmService, PhotographyService,
};
use crate::validate::FieldIssue;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub blog_service: Arc<BlogService>,
    pub film_service: Arc<FilmService>,
    pub photography_service: Arc<PhotographyService>,
    pub editorial_service: Arc<EditorialService>,
    pub contact_service: Arc<ContactService>,
    pub image_host: DynImageHost,
    pub upload_config: Arc<UploadConfig>,
    /// Bearer token granting admin access; empty disables admin endpoints
    pub admin_token: Arc<String>,
}

/// Marker inserted into request extensions once a valid admin token is seen
#[derive(Debug, Clone)]
pub struct AdminAccess;

/// Extractor reporting whether the request carries a valid admin token
///
/// Reads the `AdminAccess` marker left by `require_admin`/`optional_admin`;
/// never rejects, so public handlers can branch on it.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAdmin(pub bool);

impl<S> axum::extract::FromRequestParts<S> for MaybeAdmin
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAdmin(parts.extensions.get::<AdminAccess>().is_some()))
    }
}

/// Error response for API errors
///
/// Serializes as `{"error": "...", "issues": [...]}`; `issues` is present
/// only for validation failures.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<FieldIssue>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
            issues: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn upload_failed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Validation failed".to_string(),
            issues: Some(issues),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation(e) => Self::validation(e.issues),
            ContentError::NotFound(what) => Self::not_found(format!("Not found: {what}")),
            ContentError::Upload(e) => {
                tracing::warn!("Image host failure: {}", e);
                Self::upload_failed(e.to_string())
            }
            ContentError::Store(e) => {
                tracing::error!("Document store failure: {:#}", e);
                Self::internal("Internal server error")
            }
        }
    }
}

/// Extract the bearer token from a request
fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request.headers().get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(str::to_string)
}

/// Whether the request carries the configured admin token
fn has_admin_token(state: &AppState, request: &Request) -> bool {
    if state.admin_token.is_empty() {
        return false;
    }
    matches!(extract_bearer_token(request), Some(token) if token == state.admin_token.as_str())
}

/// Admin authorization middleware for write endpoints
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.admin_token.is_empty() {
        return Err(ApiError::forbidden("Admin access is disabled"));
    }

    let token = extract_bearer_token(&request)
        .ok_or_else(|| ApiError::unauthorized("Missing admin token"))?;

    if token != state.admin_token.as_str() {
        return Err(ApiError::forbidden("Invalid admin token"));
    }

    request.extensions_mut().insert(AdminAccess);
    Ok(next.run(request).await)
}

/// Optional admin middleware for read endpoints
///
/// Public reads stay public; a valid token additionally unlocks draft
/// visibility and the `admin=true` listing filter bypass.
pub async fn optional_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if has_admin_token(&state, &request) {
        request.extensions_mut().insert(AdminAccess);
    }
    next.run(request).await
}
