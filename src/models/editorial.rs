//! Editorial image model
//!
//! Editorial entries are single hosted images; the delete URL returned by the
//! image host is kept alongside so the image can be removed out-of-band when
//! the entry is retired.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Editorial image entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorialImage {
    /// Store-assigned identifier
    pub id: String,
    /// Hosted image URL
    pub image_url: String,
    /// Opaque deletion handle from the image host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized input for creating or fully replacing an editorial image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEditorialImage {
    pub image_url: String,
    pub delete_url: Option<String>,
    pub published: bool,
}
