//! Abuse report categories and per-user report counts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of abuse report categories.
///
/// # Example
///
/// ```
/// use review_backend::domain::ReportCategory;
///
/// let category: ReportCategory = "badLanguage".parse().expect("known category");
/// assert_eq!(category, ReportCategory::BadLanguage);
/// assert_eq!(category.to_string(), "badLanguage");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportCategory {
    /// Unsolicited or repetitive promotional content.
    Spam,
    /// Offensive or abusive wording.
    BadLanguage,
    /// Content that deliberately misleads reviewers.
    Misleading,
}

impl ReportCategory {
    /// All report categories.
    pub const ALL: [ReportCategory; 3] = [
        ReportCategory::Spam,
        ReportCategory::BadLanguage,
        ReportCategory::Misleading,
    ];

    /// Wire representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::BadLanguage => "badLanguage",
            Self::Misleading => "misleading",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown report category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReportCategoryError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseReportCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variants: Vec<_> = ReportCategory::ALL.iter().map(|v| v.as_str()).collect();
        write!(
            f,
            "invalid report category '{}': expected one of {}",
            self.input,
            variants.join(", ")
        )
    }
}

impl std::error::Error for ParseReportCategoryError {}

impl FromStr for ReportCategory {
    type Err = ParseReportCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "bad_language" {
            return Ok(Self::BadLanguage);
        }
        Self::ALL
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ParseReportCategoryError {
                input: s.to_owned(),
            })
    }
}

/// Report counts for one user plus the latched ban flag.
///
/// ## Invariants
/// - Counts only grow.
/// - `banned` never reverts to `false` once set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatus {
    spam: u32,
    bad_language: u32,
    misleading: u32,
    banned: bool,
}

impl ReportStatus {
    /// Number of reports filed under `category`.
    pub fn count_of(&self, category: ReportCategory) -> u32 {
        match category {
            ReportCategory::Spam => self.spam,
            ReportCategory::BadLanguage => self.bad_language,
            ReportCategory::Misleading => self.misleading,
        }
    }

    /// Reports filed across every category.
    pub fn total(&self) -> u64 {
        ReportCategory::ALL
            .iter()
            .map(|category| u64::from(self.count_of(*category)))
            .sum()
    }

    /// Cached ban flag maintained on every report.
    pub fn is_banned(&self) -> bool {
        self.banned
    }

    /// Record one more report and return the new count for the category.
    pub(crate) fn record(&mut self, category: ReportCategory) -> u32 {
        let slot = match category {
            ReportCategory::Spam => &mut self.spam,
            ReportCategory::BadLanguage => &mut self.bad_language,
            ReportCategory::Misleading => &mut self.misleading,
        };
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Set the ban flag. Returns `true` when this call banned the user.
    pub(crate) fn latch_ban(&mut self) -> bool {
        let newly_banned = !self.banned;
        self.banned = true;
        newly_banned
    }
}

/// Why a report was not recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum ReportRejection {
    /// The category is not one of [`ReportCategory::ALL`].
    InvalidCategory {
        /// The rejected input.
        input: String,
    },
}

/// Outcome of filing a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ReportResult {
    /// The report was counted.
    Recorded {
        /// Category the report was filed under.
        category: ReportCategory,
        /// Count for that category after this report.
        count: u32,
        /// Ban flag after this report.
        banned: bool,
        /// Whether this report caused the ban.
        #[serde(rename = "newlyBanned")]
        newly_banned: bool,
    },
    /// Nothing changed.
    Rejected(ReportRejection),
}
