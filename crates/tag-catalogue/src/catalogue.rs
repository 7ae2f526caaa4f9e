//! The fixed tag lists offered by the platform.

use std::collections::HashSet;

use crate::error::CatalogueError;
use crate::tag::{Tag, TagKind};

const LANGUAGE_TAGS: [&str; 6] = ["python", "java", "c#", "c", "javascript", "typescript"];

const SNIPPET_TAGS: [(&str, TagKind); 16] = [
    ("Sorting", TagKind::Algorithm),
    ("GCD", TagKind::Algorithm),
    ("Binary search", TagKind::Algorithm),
    ("BFS", TagKind::Algorithm),
    ("Algorithm", TagKind::Algorithm),
    ("Recursion", TagKind::General),
    ("Iterative", TagKind::General),
    ("Beginner", TagKind::General),
    ("Math", TagKind::General),
    ("String", TagKind::Datatype),
    ("Class", TagKind::Datatype),
    ("Integer", TagKind::Datatype),
    ("Memory", TagKind::Feedback),
    ("Complexity", TagKind::Feedback),
    ("Design", TagKind::Feedback),
    ("Modularity", TagKind::Feedback),
];

/// Language tags plus the snippet tags generators draw from.
///
/// ## Invariants
/// - At least one snippet tag.
/// - No blank names and no repeated `(name, kind)` pairs.
///
/// # Example
///
/// ```
/// use tag_catalogue::{TagCatalogue, TagKind};
///
/// let catalogue = TagCatalogue::default();
/// assert_eq!(catalogue.languages().len(), 6);
/// assert!(catalogue.snippet_tags().iter().any(|tag| tag.kind() == TagKind::Feedback));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCatalogue {
    languages: Vec<Tag>,
    snippet_tags: Vec<Tag>,
}

impl TagCatalogue {
    /// Build a custom catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] when there are no snippet tags, a name is
    /// blank, or a tag repeats.
    pub fn new(languages: Vec<Tag>, snippet_tags: Vec<Tag>) -> Result<Self, CatalogueError> {
        if snippet_tags.is_empty() {
            return Err(CatalogueError::NoSnippetTags);
        }
        let mut seen = HashSet::new();
        for (index, tag) in languages.iter().chain(&snippet_tags).enumerate() {
            if tag.name().trim().is_empty() {
                return Err(CatalogueError::BlankTagName { index });
            }
            if !seen.insert((tag.name(), tag.kind())) {
                return Err(CatalogueError::DuplicateTag {
                    name: tag.name().to_owned(),
                });
            }
        }
        Ok(Self {
            languages,
            snippet_tags,
        })
    }

    /// Programming language tags.
    #[must_use]
    pub fn languages(&self) -> &[Tag] {
        &self.languages
    }

    /// Tags a snippet or review can carry.
    #[must_use]
    pub fn snippet_tags(&self) -> &[Tag] {
        &self.snippet_tags
    }
}

impl Default for TagCatalogue {
    fn default() -> Self {
        Self {
            languages: LANGUAGE_TAGS
                .iter()
                .map(|name| Tag::new(*name, TagKind::Language))
                .collect(),
            snippet_tags: SNIPPET_TAGS
                .iter()
                .map(|(name, kind)| Tag::new(*name, *kind))
                .collect(),
        }
    }
}
