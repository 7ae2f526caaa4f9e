//! Reputation score calculation.

use super::{Impression, Polarity};

/// Per-vote weights applied when scoring an impression ledger.
///
/// # Examples
/// ```
/// use review_backend::domain::ScoreWeights;
///
/// let weights = ScoreWeights::default();
/// assert_eq!(weights.positive, 1);
/// assert_eq!(weights.negative, -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Contribution of each positive impression.
    pub positive: i64,
    /// Contribution of each negative impression.
    pub negative: i64,
}

impl ScoreWeights {
    /// Build weights from explicit values.
    pub const fn new(positive: i64, negative: i64) -> Self {
        Self { positive, negative }
    }

    /// Contribution of one impression with the given polarity.
    pub const fn weight(&self, polarity: Polarity) -> i64 {
        match polarity {
            Polarity::Positive => self.positive,
            Polarity::Negative => self.negative,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(1, -1)
    }
}

/// Sum the weighted polarity of every impression.
///
/// Impressions are tallied per polarity before weighting, so the result does
/// not depend on iteration order. An empty ledger scores zero.
pub fn calculate<'a>(
    impressions: impl IntoIterator<Item = &'a Impression>,
    weights: ScoreWeights,
) -> i64 {
    let (positive, negative) =
        impressions
            .into_iter()
            .fold((0_i64, 0_i64), |(positive, negative), impression| {
                match impression.polarity {
                    Polarity::Positive => (positive.saturating_add(1), negative),
                    Polarity::Negative => (positive, negative.saturating_add(1)),
                }
            });
    positive
        .saturating_mul(weights.weight(Polarity::Positive))
        .saturating_add(negative.saturating_mul(weights.weight(Polarity::Negative)))
}
