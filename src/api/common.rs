//! Common API utilities and shared types
//!
//! Query and response shapes shared across the collection endpoints.

use serde::{Deserialize, Serialize};

use crate::api::middleware::ApiError;
use crate::models::CursorParams;

/// Default page size for the photography/editorial image grids
pub fn default_grid_limit() -> i64 {
    6
}

/// Default page size for blog and film listings
pub fn default_list_limit() -> i64 {
    10
}

/// Default page size for the admin contact inbox
pub fn default_inbox_limit() -> i64 {
    20
}

/// Query parameters for cursor-paginated listings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Page size; clamped server-side
    pub limit: Option<i64>,
    /// Id of the last document of the previous page
    pub last_id: Option<String>,
    /// Bypass the published-only filter (admin token required)
    #[serde(default)]
    pub admin: bool,
}

impl ListQuery {
    /// Build cursor parameters with a per-collection default limit
    pub fn cursor(&self, default_limit: i64) -> CursorParams {
        CursorParams::new(self.limit.unwrap_or(default_limit), self.last_id.clone())
    }

    /// Resolve the published filter for this request
    ///
    /// `admin=true` without a valid token is an authorization error, never a
    /// silent fall back to the filtered view.
    pub fn published_only(&self, is_admin: bool) -> Result<bool, ApiError> {
        if !self.admin {
            return Ok(true);
        }
        if !is_admin {
            return Err(ApiError::unauthorized(
                "Admin token required for unfiltered listing",
            ));
        }
        Ok(false)
    }
}

/// Body of a successful create: the store-assigned id
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Body of a successful delete or other side-effect-only operation
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
