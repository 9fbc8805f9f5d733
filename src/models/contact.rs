//! Contact inquiry model
//!
//! Inquiries are write-once from the public contact form. The admin can list
//! them, flip the `read` flag, and delete them; nothing else mutates an
//! inquiry after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact inquiry entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    /// Store-assigned identifier
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub details: String,
    pub location: String,
    /// Requested shoot date, free-form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Requested shoot length, free-form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    /// Whether the admin has seen this inquiry
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Normalized input for a new inquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub details: String,
    pub location: String,
    pub date: Option<String>,
    pub days: Option<String>,
}
