//! Content schema validation
//!
//! Every write passes through here before it reaches the document store.
//! Each entity type has a payload shape (the loosely-typed JSON body accepted
//! at the HTTP boundary) and a validator that either produces the normalized
//! strongly-typed input record or a list of field-level issues. Validators are
//! pure: no I/O, no panics past the boundary.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{
    BlockKind, ContentBlock, NewBlogPost, NewContactInquiry, NewEditorialImage, NewFilm,
    NewPhotoAlbum,
};

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Dotted path of the offending field, e.g. `description[2].content`
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure carrying every issue found in the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for issue in &self.issues {
            write!(f, "; {}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collects issues while a payload is checked field by field
#[derive(Debug, Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldIssue::new(field, message));
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}

/// Trimmed copy of a required string field; records an issue when blank
fn required(issues: &mut Issues, field: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(field, message);
    }
    trimmed.to_string()
}

/// Trimmed copy of an optional string field; blank collapses to `None`
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Whether a string parses as an absolute http(s) URL
fn is_well_formed_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn check_url(issues: &mut Issues, field: &str, value: &str) {
    if !is_well_formed_url(value) {
        issues.push(field, "Invalid URL");
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
fn is_plausible_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.chars().any(char::is_whitespace)
}

// ============================================================================
// Payload shapes
// ============================================================================

/// Raw blog post payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: Vec<BlockPayload>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// Raw content block inside a blog payload
///
/// The kind stays a plain string here so an unknown value becomes a
/// field-level issue instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockPayload {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

/// Raw film payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Raw photography album payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAlbumPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// Raw editorial image payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorialPayload {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub delete_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Raw contact form payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub days: Option<String>,
}

// ============================================================================
// Validators
// ============================================================================

/// Validate a blog payload into a normalized record
pub fn blog_post(payload: BlogPayload) -> Result<NewBlogPost, ValidationError> {
    let mut issues = Issues::default();

    let title = required(&mut issues, "title", &payload.title, "Title is required");
    let short_description = required(
        &mut issues,
        "shortDescription",
        &payload.short_description,
        "Short description is required",
    );

    if payload.description.is_empty() {
        issues.push("description", "At least one content block is required");
    }
    let mut description = Vec::with_capacity(payload.description.len());
    for (i, block) in payload.description.iter().enumerate() {
        let kind = match BlockKind::parse(&block.kind) {
            Some(kind) => kind,
            None => {
                issues.push(
                    format!("description[{i}].type"),
                    "Expected paragraph, heading1, heading2 or heading3",
                );
                continue;
            }
        };
        if block.content.trim().is_empty() {
            issues.push(
                format!("description[{i}].content"),
                "Block content must not be empty",
            );
            continue;
        }
        description.push(ContentBlock {
            kind,
            content: block.content.clone(),
        });
    }

    for (i, image) in payload.images.iter().enumerate() {
        check_url(&mut issues, &format!("images[{i}]"), image);
    }

    issues.into_result(NewBlogPost {
        title,
        short_description,
        description,
        images: payload.images,
        published: payload.published,
    })
}

/// Validate a film payload into a normalized record
pub fn film(payload: FilmPayload) -> Result<NewFilm, ValidationError> {
    let mut issues = Issues::default();

    let title = required(&mut issues, "title", &payload.title, "Title is required");
    let location = required(
        &mut issues,
        "location",
        &payload.location,
        "Location is required",
    );

    if payload.video_url.trim().is_empty() {
        issues.push("videoUrl", "Video URL is required");
    } else {
        check_url(&mut issues, "videoUrl", payload.video_url.trim());
    }

    let thumbnail = optional(payload.thumbnail.as_deref());
    if let Some(thumb) = &thumbnail {
        check_url(&mut issues, "thumbnail", thumb);
    }

    issues.into_result(NewFilm {
        title,
        location,
        description: optional(payload.description.as_deref()),
        video_url: payload.video_url.trim().to_string(),
        thumbnail,
        published: payload.published,
    })
}

/// Validate a photography album payload into a normalized record
pub fn photo_album(payload: PhotoAlbumPayload) -> Result<NewPhotoAlbum, ValidationError> {
    let mut issues = Issues::default();

    let title = required(&mut issues, "title", &payload.title, "Title is required");
    let location = required(
        &mut issues,
        "location",
        &payload.location,
        "Location is required",
    );
    let description = required(
        &mut issues,
        "description",
        &payload.description,
        "Description is required",
    );

    // Albums are image galleries; an empty one has nothing to show
    if payload.images.is_empty() {
        issues.push("images", "At least one image is required");
    }
    for (i, image) in payload.images.iter().enumerate() {
        check_url(&mut issues, &format!("images[{i}]"), image);
    }

    issues.into_result(NewPhotoAlbum {
        title,
        location,
        description,
        images: payload.images,
        published: payload.published,
    })
}

/// Validate an editorial image payload into a normalized record
pub fn editorial_image(payload: EditorialPayload) -> Result<NewEditorialImage, ValidationError> {
    let mut issues = Issues::default();

    if payload.image_url.trim().is_empty() {
        issues.push("imageUrl", "Image URL is required");
    } else {
        check_url(&mut issues, "imageUrl", payload.image_url.trim());
    }

    issues.into_result(NewEditorialImage {
        image_url: payload.image_url.trim().to_string(),
        delete_url: optional(payload.delete_url.as_deref()),
        published: payload.published,
    })
}

/// Validate a contact form payload into a normalized record
pub fn contact_inquiry(payload: ContactPayload) -> Result<NewContactInquiry, ValidationError> {
    let mut issues = Issues::default();

    let name = required(&mut issues, "name", &payload.name, "Name is required");
    let phone = required(&mut issues, "phone", &payload.phone, "Phone is required");
    let details = required(
        &mut issues,
        "details",
        &payload.details,
        "Details are required",
    );
    let location = required(
        &mut issues,
        "location",
        &payload.location,
        "Location is required",
    );

    let email = payload.email.trim().to_string();
    if email.is_empty() {
        issues.push("email", "Email is required");
    } else if !is_plausible_email(&email) {
        issues.push("email", "Invalid email");
    }

    issues.into_result(NewContactInquiry {
        name,
        email,
        phone,
        details,
        location,
        date: optional(payload.date.as_deref()),
        days: optional(payload.days.as_deref()),
    })
}
