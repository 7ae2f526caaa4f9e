//! Fixed code-review tag catalogue with deterministic tag generation.
//!
//! The crate provides:
//!
//! - [`Tag`] and [`TagKind`]: named tags grouped by category.
//! - [`TagCatalogue`]: the platform's language tags and snippet tags.
//! - [`TagGenerator`]: random selection from the snippet tags using an
//!   explicitly owned, seedable random source.
//!
//! # Example
//!
//! ```
//! use tag_catalogue::{TagGenerator, TagKind};
//!
//! let mut generator = TagGenerator::from_seed(42);
//! let tags = generator.generate_many(3);
//! assert_eq!(tags.len(), 3);
//!
//! let other = generator.generate_without(TagKind::Algorithm).expect("non-algorithm tags exist");
//! assert_ne!(other.kind(), TagKind::Algorithm);
//! ```

mod catalogue;
mod error;
mod generator;
mod tag;

pub use catalogue::TagCatalogue;
pub use error::CatalogueError;
pub use generator::TagGenerator;
pub use tag::{Tag, TagKind};
