//! Threshold policy deciding when report counts ban a user.

use super::report::{ReportCategory, ReportStatus};

/// Report thresholds that ban a user.
///
/// A user is banned once the summed report count reaches `total_threshold`,
/// or once any single category reaches `category_threshold` when one is set.
/// Thresholds below one are raised to one so an unreported user is never
/// banned.
///
/// # Examples
/// ```
/// use review_backend::domain::BanPolicy;
///
/// let policy = BanPolicy::new(3).with_category_threshold(2);
/// assert_eq!(policy.total_threshold(), 3);
/// assert_eq!(policy.category_threshold(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanPolicy {
    total_threshold: u32,
    category_threshold: Option<u32>,
}

impl BanPolicy {
    /// Default summed report count that bans a user.
    pub const DEFAULT_TOTAL_THRESHOLD: u32 = 3;

    /// Ban on the summed report count only.
    pub fn new(total_threshold: u32) -> Self {
        Self {
            total_threshold: total_threshold.max(1),
            category_threshold: None,
        }
    }

    /// Also ban when any single category reaches `threshold`.
    #[must_use]
    pub fn with_category_threshold(mut self, threshold: u32) -> Self {
        self.category_threshold = Some(threshold.max(1));
        self
    }

    /// Summed report count that bans a user.
    pub fn total_threshold(&self) -> u32 {
        self.total_threshold
    }

    /// Per-category report count that bans a user, if configured.
    pub fn category_threshold(&self) -> Option<u32> {
        self.category_threshold
    }

    /// Decide from the counts alone whether the user is banned.
    ///
    /// Counts only grow, so once this returns `true` for a status it keeps
    /// returning `true` for every status reachable by further reports.
    pub fn is_banned(&self, status: &ReportStatus) -> bool {
        if status.total() >= u64::from(self.total_threshold) {
            return true;
        }
        self.category_threshold.is_some_and(|threshold| {
            ReportCategory::ALL
                .iter()
                .any(|category| status.count_of(*category) >= threshold)
        })
    }
}

impl Default for BanPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOTAL_THRESHOLD)
    }
}
