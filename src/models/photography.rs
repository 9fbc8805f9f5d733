//! Photography album model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Photography album entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAlbum {
    /// Store-assigned identifier
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    /// Hosted image URLs; never empty for a stored album
    pub images: Vec<String>,
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized input for creating or fully replacing a photography album
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhotoAlbum {
    pub title: String,
    pub location: String,
    pub description: String,
    pub images: Vec<String>,
    pub published: bool,
}
