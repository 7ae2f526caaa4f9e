//! Error types for the tag-catalogue crate.

use thiserror::Error;

/// Errors raised when building a custom [`crate::TagCatalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The catalogue would hold no snippet tags to generate from.
    #[error("catalogue must contain at least one snippet tag")]
    NoSnippetTags,

    /// A tag name was blank once trimmed.
    #[error("tag name at index {index} must not be blank")]
    BlankTagName {
        /// Position of the offending tag in the input list.
        index: usize,
    },

    /// The same name and kind appeared twice.
    #[error("duplicate tag '{name}'")]
    DuplicateTag {
        /// Name of the repeated tag.
        name: String,
    },
}
