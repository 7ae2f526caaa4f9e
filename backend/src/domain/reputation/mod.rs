//! Impression ledger for peer votes.
//!
//! Each user owns one [`Reputation`], which keeps at most one [`Impression`]
//! per `(voter, source)` pair. A repeated vote replaces the earlier one, so
//! the score derived from the ledger never double counts a voter on the same
//! content item.

mod score;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

pub use self::score::{ScoreWeights, calculate};

/// Validation errors for vote identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteValidationError {
    /// The voter identifier was blank.
    EmptyVoterId,
    /// Neither a code-review section nor a snippet was named.
    EmptySourceId,
}

impl fmt::Display for VoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVoterId => write!(f, "voter id must not be empty"),
            Self::EmptySourceId => {
                write!(f, "a code review section id or snippet id is required")
            }
        }
    }
}

impl std::error::Error for VoteValidationError {}

/// Identifier of the user casting a vote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoterId(String);

impl VoterId {
    /// Construct a voter id, rejecting blank input.
    ///
    /// Surrounding whitespace is dropped and UUIDs are stored in their
    /// canonical lowercase hyphenated form, so one voter always maps to one
    /// ledger key.
    ///
    /// # Examples
    /// ```
    /// use review_backend::domain::VoterId;
    ///
    /// let voter = VoterId::new(" 67E55044-10B1-426F-9247-BB680E5FE0C8\n").expect("valid voter");
    /// assert_eq!(voter.as_ref(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    /// assert_eq!(VoterId::new(" bob ").expect("valid voter").as_ref(), "bob");
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, VoteValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VoteValidationError::EmptyVoterId);
        }
        let normalised = match Uuid::parse_str(trimmed) {
            Ok(uuid) => uuid.to_string(),
            Err(_) => trimmed.to_owned(),
        };
        Ok(Self(normalised))
    }

    /// The voter id as a UUID, when it is one.
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }
}

impl AsRef<str> for VoterId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<VoterId> for String {
    fn from(value: VoterId) -> Self {
        value.0
    }
}

impl TryFrom<String> for VoterId {
    type Error = VoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier of the voted-on content item: a snippet or a review section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Construct a source id, rejecting blank input. Surrounding whitespace
    /// is dropped.
    pub fn new(raw: impl Into<String>) -> Result<Self, VoteValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(VoteValidationError::EmptySourceId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Pick the voted-on item from a vote request.
    ///
    /// A non-blank code-review section id takes precedence over the snippet
    /// id.
    ///
    /// # Examples
    /// ```
    /// use review_backend::domain::SourceId;
    ///
    /// let source = SourceId::resolve(Some("section-7"), Some("snippet-1")).expect("source resolves");
    /// assert_eq!(source.as_ref(), "section-7");
    ///
    /// let source = SourceId::resolve(Some(""), Some("snippet-1")).expect("source resolves");
    /// assert_eq!(source.as_ref(), "snippet-1");
    /// ```
    pub fn resolve(
        code_review_section_id: Option<&str>,
        snippet_id: Option<&str>,
    ) -> Result<Self, VoteValidationError> {
        match code_review_section_id.filter(|id| !id.trim().is_empty()) {
            Some(section) => Self::new(section),
            None => Self::new(snippet_id.unwrap_or_default()),
        }
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SourceId> for String {
    fn from(value: SourceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for SourceId {
    type Error = VoteValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Upvote.
    Positive,
    /// Downvote.
    Negative,
}

/// One recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impression {
    /// Who voted.
    pub voter_id: VoterId,
    /// What was voted on.
    pub source_id: SourceId,
    /// Vote direction.
    pub polarity: Polarity,
    /// When the vote was last cast. Audit only; never affects the score.
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ImpressionKey {
    voter_id: VoterId,
    source_id: SourceId,
}

/// Why a vote was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteRejection {
    /// The voter owns the content being voted on.
    SelfVote,
}

/// Outcome of casting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum VoteResult {
    /// The impression was stored.
    Accepted {
        /// `true` when an earlier vote by the same voter on the same source
        /// was replaced.
        #[serde(rename = "wasUpdate")]
        was_update: bool,
    },
    /// The vote was ignored and nothing changed.
    Rejected {
        /// Rejection cause.
        reason: VoteRejection,
    },
}

impl VoteResult {
    /// Whether the vote changed the ledger.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Impression ledger owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reputation {
    #[serde(serialize_with = "serialize_impressions")]
    impressions: BTreeMap<ImpressionKey, Impression>,
}

fn serialize_impressions<S: Serializer>(
    impressions: &BTreeMap<ImpressionKey, Impression>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(impressions.values())
}

impl Reputation {
    /// Insert the impression or replace the one with the same key.
    ///
    /// Returns `true` when an existing impression was replaced.
    pub(crate) fn upsert(&mut self, impression: Impression) -> bool {
        let key = ImpressionKey {
            voter_id: impression.voter_id.clone(),
            source_id: impression.source_id.clone(),
        };
        self.impressions.insert(key, impression).is_some()
    }

    /// Fresh iterator over the stored impressions.
    pub fn impressions(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Impression> + ExactSizeIterator + '_ {
        self.impressions.values()
    }

    /// The impression a voter left on a source, if any.
    pub fn impression(&self, voter_id: &VoterId, source_id: &SourceId) -> Option<&Impression> {
        let key = ImpressionKey {
            voter_id: voter_id.clone(),
            source_id: source_id.clone(),
        };
        self.impressions.get(&key)
    }

    /// Number of stored impressions.
    pub fn len(&self) -> usize {
        self.impressions.len()
    }

    /// Whether no impressions are stored.
    pub fn is_empty(&self) -> bool {
        self.impressions.is_empty()
    }

    /// Score the ledger with the given weights.
    pub fn score(&self, weights: ScoreWeights) -> i64 {
        calculate(self.impressions(), weights)
    }
}

#[cfg(test)]
mod tests;
