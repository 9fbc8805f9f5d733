//! Repository layer
//!
//! One repository per collection, each a trait (the seam the services depend
//! on) plus a sqlx implementation. All listings share the same contract:
//! strictly `created_at DESC` with `id DESC` as tiebreak, keyset continuation
//! from the last-seen document, `has_more` approximated by a full page.
//!
//! A cursor whose document has been deleted resets to the first page; the
//! continuation anchor is looked up by id at query time and a missing anchor
//! simply drops the keyset predicate.

pub mod blog;
pub mod contact;
pub mod editorial;
pub mod film;
pub mod photography;

pub use blog::{BlogRepository, SqlxBlogRepository};
pub use contact::{ContactRepository, SqlxContactRepository};
pub use editorial::{EditorialRepository, SqlxEditorialRepository};
pub use film::{FilmRepository, SqlxFilmRepository};
pub use photography::{PhotographyRepository, SqlxPhotographyRepository};
