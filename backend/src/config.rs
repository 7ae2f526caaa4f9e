//! Moderation configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{BanPolicy, DEFAULT_MAX_CONFLICT_RETRIES, ModerationEngine, ScoreWeights};

const DEFAULT_POSITIVE_VOTE_WEIGHT: i64 = 1;
const DEFAULT_NEGATIVE_VOTE_WEIGHT: i64 = -1;

/// Tunable thresholds and weights for the moderation engine.
///
/// Every value is optional; accessors fall back to the built-in defaults.
/// Environment variables use the `MODERATION_` prefix, for example
/// `MODERATION_BAN_TOTAL_THRESHOLD=5`.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MODERATION")]
pub struct ModerationSettings {
    /// Summed report count that bans a user.
    pub ban_total_threshold: Option<u32>,
    /// Per-category report count that bans a user.
    pub ban_category_threshold: Option<u32>,
    /// Score contribution of a positive impression.
    pub positive_vote_weight: Option<i64>,
    /// Score contribution of a negative impression.
    pub negative_vote_weight: Option<i64>,
    /// Retries after a revision conflict before giving up.
    pub max_conflict_retries: Option<u32>,
}

impl ModerationSettings {
    /// Score weights, falling back to +1/-1.
    pub fn score_weights(&self) -> ScoreWeights {
        ScoreWeights::new(
            self.positive_vote_weight
                .unwrap_or(DEFAULT_POSITIVE_VOTE_WEIGHT),
            self.negative_vote_weight
                .unwrap_or(DEFAULT_NEGATIVE_VOTE_WEIGHT),
        )
    }

    /// Ban policy, falling back to a total threshold of three.
    pub fn ban_policy(&self) -> BanPolicy {
        let policy = BanPolicy::new(
            self.ban_total_threshold
                .unwrap_or(BanPolicy::DEFAULT_TOTAL_THRESHOLD),
        );
        match self.ban_category_threshold {
            Some(threshold) => policy.with_category_threshold(threshold),
            None => policy,
        }
    }

    /// Engine built from the weights and ban policy.
    pub fn engine(&self) -> ModerationEngine {
        ModerationEngine::new(self.score_weights(), self.ban_policy())
    }

    /// Retry bound, falling back to three.
    pub fn max_conflict_retries(&self) -> u32 {
        self.max_conflict_retries
            .unwrap_or(DEFAULT_MAX_CONFLICT_RETRIES)
    }
}
