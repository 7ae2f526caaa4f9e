//! Tag values attached to snippets and reviews.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Programming language of a snippet.
    Language,
    /// Algorithm or technique a snippet demonstrates.
    Algorithm,
    /// Data type a snippet centres on.
    Datatype,
    /// Aspect a review comments on.
    Feedback,
    /// Anything without a more specific kind.
    General,
}

impl TagKind {
    /// All tag kinds.
    pub const ALL: [Self; 5] = [
        Self::Language,
        Self::Algorithm,
        Self::Datatype,
        Self::Feedback,
        Self::General,
    ];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Algorithm => "algorithm",
            Self::Datatype => "datatype",
            Self::Feedback => "feedback",
            Self::General => "general",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named tag.
///
/// # Example
///
/// ```
/// use tag_catalogue::{Tag, TagKind};
///
/// let tag = Tag::new("Recursion", TagKind::General);
/// assert_eq!(tag.name(), "Recursion");
/// assert_eq!(tag.kind(), TagKind::General);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    kind: TagKind,
}

impl Tag {
    /// Build a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TagKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Display name, for example `"Binary search"`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Tag category.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        self.kind
    }
}
