//! Upload API endpoints
//!
//! Handles image uploads for the admin surface:
//! - POST /api/v1/upload/image - Forward an image to the external host
//! - POST /api/v1/upload/delete - Delete a hosted image out-of-band
//!
//! The backend never stores image bytes itself; it validates the file and
//! delegates to the image host, returning the hosted URL and deletion handle
//! for the admin client to attach to a content entity. When the host fails,
//! nothing is persisted and the admin must re-initiate the upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::services::ContentError;

/// Response for a successful upload
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub delete_url: String,
    pub thumb_url: String,
}

/// Request body for out-of-band image deletion
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    pub delete_url: String,
}

/// Response for a successful deletion
#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    pub message: String,
}

/// POST /api/v1/upload/image - Upload a single image
///
/// Accepts multipart/form-data with the file in an "image" (or "file") field.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let config = &state.upload_config;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "image" && name != "file" {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        if !config.is_type_allowed(&content_type) {
            return Err(ApiError::bad_request(format!(
                "Invalid file type: {}. Allowed types: {:?}",
                content_type, config.allowed_types
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

        if data.len() as u64 > config.max_file_size {
            return Err(ApiError::bad_request(format!(
                "File too large. Maximum size: {} MB",
                config.max_file_size / 1024 / 1024
            )));
        }

        let uploaded = state
            .image_host
            .upload(data.to_vec(), &filename)
            .await
            .map_err(ContentError::Upload)?;

        return Ok(Json(UploadResponse {
            url: uploaded.url,
            delete_url: uploaded.delete_url,
            thumb_url: uploaded.thumb_url,
        }));
    }

    Err(ApiError::bad_request("No file provided"))
}

/// POST /api/v1/upload/delete - Delete a hosted image
pub async fn delete_image(
    State(state): State<AppState>,
    Json(body): Json<DeleteImageRequest>,
) -> Result<Json<DeleteImageResponse>, ApiError> {
    if body.delete_url.is_empty() {
        return Err(ApiError::bad_request("No deleteUrl provided"));
    }

    state
        .image_host
        .delete(&body.delete_url)
        .await
        .map_err(ContentError::Upload)?;

    Ok(Json(DeleteImageResponse {
        message: "Image deleted successfully".to_string(),
    }))
}
