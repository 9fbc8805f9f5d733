//! Service layer
//!
//! One service per collection, sitting between the HTTP handlers and the
//! repositories: payloads are validated here before any write, and storage
//! results are mapped onto the shared error taxonomy.

pub mod blog;
pub mod contact;
pub mod editorial;
pub mod film;
pub mod photography;

pub use blog::BlogService;
pub use contact::ContactService;
pub use editorial::EditorialService;
pub use film::FilmService;
pub use photography::PhotographyService;

use crate::imagehost::ImageHostError;
use crate::validate::ValidationError;

/// Error taxonomy for every content operation
///
/// Maps one-to-one onto the HTTP surface: validation failures are
/// client-correctable 400s, missing documents are 404s, image host failures
/// are upstream 502s, and anything out of the store is an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Payload failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The external image host failed or refused
    #[error(transparent)]
    Upload(#[from] ImageHostError),

    /// Document store failure
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
