//! Domain models
//!
//! Strongly-typed records for each content collection, the input shapes the
//! validator produces, and the cursor pagination containers shared by every
//! list query.

pub mod blog;
pub mod contact;
pub mod editorial;
pub mod film;
pub mod page;
pub mod photography;

pub use blog::{BlockKind, BlogPost, ContentBlock, NewBlogPost};
pub use contact::{ContactInquiry, NewContactInquiry};
pub use editorial::{EditorialImage, NewEditorialImage};
pub use film::{Film, NewFilm};
pub use page::{CursorPage, CursorParams};
pub use photography::{NewPhotoAlbum, PhotoAlbum};
