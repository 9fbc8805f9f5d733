//! Blog post model
//!
//! This module provides:
//! - `BlogPost` entity representing a blog post
//! - `ContentBlock`/`BlockKind` for the ordered rich-text body
//! - `NewBlogPost`, the normalized input produced by the validator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Store-assigned identifier
    pub id: String,
    /// Post title
    pub title: String,
    /// Teaser shown in list views
    pub short_description: String,
    /// Ordered body blocks; order is the array index
    pub description: Vec<ContentBlock>,
    /// Hosted image URLs (may be empty)
    #[serde(default)]
    pub images: Vec<String>,
    /// Public visibility gate
    #[serde(default)]
    pub published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// One ordered unit of blog body content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block kind (paragraph or heading level)
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Block text
    pub content: String,
}

/// Content block kind
///
/// Blocks do not nest; a blog body is a flat ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
}

impl BlockKind {
    /// Wire/storage string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::Heading3 => "heading3",
        }
    }

    /// Parse the wire string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(BlockKind::Paragraph),
            "heading1" => Some(BlockKind::Heading1),
            "heading2" => Some(BlockKind::Heading2),
            "heading3" => Some(BlockKind::Heading3),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized input for creating or fully replacing a blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub short_description: String,
    pub description: Vec<ContentBlock>,
    pub images: Vec<String>,
    pub published: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_wire_names() {
        let block = ContentBlock {
            kind: BlockKind::Heading2,
            content: "Venues".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading2");
        assert_eq!(json["content"], "Venues");
    }

    #[test]
    fn test_block_kind_rejects_unknown() {
        let raw = serde_json::json!({ "type": "heading4", "content": "x" });
        assert!(serde_json::from_value::<ContentBlock>(raw).is_err());
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = BlogPost {
            id: "abc".to_string(),
            title: "t".to_string(),
            short_description: "s".to_string(),
            description: vec![],
            images: vec![],
            published: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("shortDescription").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("short_description").is_none());
    }
}
