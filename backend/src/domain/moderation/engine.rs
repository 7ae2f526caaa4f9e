//! Synchronous moderation operations over one user aggregate.

use chrono::{DateTime, Utc};

use super::ban_policy::BanPolicy;
use super::report::{ReportCategory, ReportRejection, ReportResult};
use crate::domain::notification::Notification;
use crate::domain::reputation::{
    Impression, Polarity, ScoreWeights, SourceId, VoteRejection, VoteResult, VoterId,
};
use crate::domain::user::User;

/// Applies votes, reports, and notifications to a [`User`].
///
/// The engine holds only configuration. Every operation works on the user
/// passed in and performs no I/O, so callers decide how the aggregate is
/// loaded, locked, and committed.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use review_backend::domain::{
///     Credential, ModerationEngine, Polarity, SourceId, User, UserId, Username, VoterId,
/// };
///
/// let engine = ModerationEngine::default();
/// let mut user = User::register(
///     UserId::random(),
///     Username::new("ada").expect("valid username"),
///     Credential::from_password("secret").expect("valid password"),
/// );
/// let outcome = engine.cast_vote(
///     &mut user,
///     VoterId::new("reviewer").expect("voter"),
///     SourceId::new("snippet-1").expect("source"),
///     Polarity::Positive,
///     Utc::now(),
/// );
/// assert!(outcome.is_accepted());
/// assert_eq!(engine.score(&user), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModerationEngine {
    weights: ScoreWeights,
    ban_policy: BanPolicy,
}

impl ModerationEngine {
    /// Engine with the given score weights and ban thresholds.
    pub fn new(weights: ScoreWeights, ban_policy: BanPolicy) -> Self {
        Self {
            weights,
            ban_policy,
        }
    }

    /// Configured score weights.
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Configured ban thresholds.
    pub fn ban_policy(&self) -> BanPolicy {
        self.ban_policy
    }

    /// Record or replace the voter's impression of `source_id`.
    ///
    /// A vote cast by the target user is rejected and leaves the ledger
    /// untouched.
    pub fn cast_vote(
        &self,
        target: &mut User,
        voter_id: VoterId,
        source_id: SourceId,
        polarity: Polarity,
        recorded_at: DateTime<Utc>,
    ) -> VoteResult {
        if voter_id.as_uuid().as_ref() == Some(target.id().as_uuid()) {
            return VoteResult::Rejected {
                reason: VoteRejection::SelfVote,
            };
        }
        let was_update = target.reputation_mut().upsert(Impression {
            voter_id,
            source_id,
            polarity,
            recorded_at,
        });
        VoteResult::Accepted { was_update }
    }

    /// Current reputation score of `target`.
    pub fn score(&self, target: &User) -> i64 {
        target.reputation().score(self.weights)
    }

    /// Read-only view of the impressions stored for `target`.
    pub fn impressions_for<'a>(
        &self,
        target: &'a User,
    ) -> impl DoubleEndedIterator<Item = &'a Impression> + ExactSizeIterator + 'a {
        target.reputation().impressions()
    }

    /// Parse `raw_category` and file a report under it.
    pub fn file_report(&self, target: &mut User, raw_category: &str) -> ReportResult {
        match raw_category.parse::<ReportCategory>() {
            Ok(category) => self.file_report_category(target, category),
            Err(err) => ReportResult::Rejected(ReportRejection::InvalidCategory { input: err.input }),
        }
    }

    /// File a report under an already parsed category and re-evaluate the ban.
    pub fn file_report_category(&self, target: &mut User, category: ReportCategory) -> ReportResult {
        let status = target.report_status_mut();
        let count = status.record(category);
        let newly_banned = self.ban_policy.is_banned(status) && status.latch_ban();
        ReportResult::Recorded {
            category,
            count,
            banned: status.is_banned(),
            newly_banned,
        }
    }

    /// Reports filed against `target` under `category`.
    pub fn count_of(&self, target: &User, category: ReportCategory) -> u32 {
        target.report_status().count_of(category)
    }

    /// Cached ban flag. Reflects the policy as of the last filed report.
    pub fn is_banned(&self, target: &User) -> bool {
        target.report_status().is_banned()
    }

    /// Append `notification` to the user's sequence.
    pub fn push_notification(&self, target: &mut User, notification: Notification) {
        target.notifications_mut().push(notification);
    }

    /// Notifications in arrival order.
    pub fn notifications<'a>(&self, target: &'a User) -> &'a [Notification] {
        target.notifications()
    }
}
