//! Tests for the impression ledger and score calculation.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, second)
        .single()
        .expect("valid timestamp")
}

fn impression(voter: &str, source: &str, polarity: Polarity) -> Impression {
    Impression {
        voter_id: VoterId::new(voter).expect("voter id"),
        source_id: SourceId::new(source).expect("source id"),
        polarity,
        recorded_at: at(0),
    }
}

#[fixture]
fn ledger() -> Reputation {
    let mut ledger = Reputation::default();
    ledger.upsert(impression("alice", "s1", Polarity::Positive));
    ledger.upsert(impression("bob", "s1", Polarity::Positive));
    ledger.upsert(impression("carol", "s2", Polarity::Negative));
    ledger
}

#[rstest]
#[case("")]
#[case("   ")]
fn voter_id_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(
        VoterId::new(raw).expect_err("blank voter"),
        VoteValidationError::EmptyVoterId
    );
}

#[rstest]
#[case(" bob", "bob")]
#[case("bob\t\n", "bob")]
#[case(
    "67E55044-10B1-426F-9247-BB680E5FE0C8",
    "67e55044-10b1-426f-9247-bb680e5fe0c8"
)]
#[case(
    " 67e55044-10b1-426f-9247-bb680e5fe0c8 ",
    "67e55044-10b1-426f-9247-bb680e5fe0c8"
)]
fn voter_id_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    let voter = VoterId::new(raw).expect("voter id");
    assert_eq!(voter.as_ref(), expected);
    assert_eq!(voter, VoterId::new(expected).expect("voter id"));
}

#[rstest]
fn voter_id_exposes_uuid_only_for_uuids() {
    assert!(VoterId::new("bob").expect("voter id").as_uuid().is_none());
    let uuid = Uuid::new_v4();
    assert_eq!(
        VoterId::new(uuid.to_string()).expect("voter id").as_uuid(),
        Some(uuid)
    );
}

#[rstest]
#[case(Some("section"), Some("snippet"), "section")]
#[case(None, Some("snippet"), "snippet")]
#[case(Some("  "), Some("snippet"), "snippet")]
#[case(Some("section"), None, "section")]
fn resolve_prefers_review_section(
    #[case] section: Option<&str>,
    #[case] snippet: Option<&str>,
    #[case] expected: &str,
) {
    let source = SourceId::resolve(section, snippet).expect("source resolves");
    assert_eq!(source.as_ref(), expected);
}

#[rstest]
#[case(None, None)]
#[case(Some(""), Some(" "))]
fn resolve_requires_some_source(#[case] section: Option<&str>, #[case] snippet: Option<&str>) {
    assert_eq!(
        SourceId::resolve(section, snippet).expect_err("missing source"),
        VoteValidationError::EmptySourceId
    );
}

#[rstest]
fn upsert_replaces_same_voter_and_source(mut ledger: Reputation) {
    let replaced = ledger.upsert(Impression {
        recorded_at: at(30),
        ..impression("alice", "s1", Polarity::Negative)
    });

    assert!(replaced);
    assert_eq!(ledger.len(), 3);
    let stored = ledger
        .impression(
            &VoterId::new("alice").expect("voter id"),
            &SourceId::new("s1").expect("source id"),
        )
        .expect("impression stored");
    assert_eq!(stored.polarity, Polarity::Negative);
    assert_eq!(stored.recorded_at, at(30));
}

#[rstest]
fn upsert_keeps_distinct_sources_apart(mut ledger: Reputation) {
    let replaced = ledger.upsert(impression("alice", "s2", Polarity::Positive));
    assert!(!replaced);
    assert_eq!(ledger.len(), 4);
}

#[rstest]
fn impressions_can_be_iterated_repeatedly(ledger: Reputation) {
    assert_eq!(ledger.impressions().count(), 3);
    assert_eq!(ledger.impressions().count(), 3);
}

#[rstest]
fn empty_ledger_scores_zero() {
    assert_eq!(Reputation::default().score(ScoreWeights::default()), 0);
}

#[rstest]
#[case(ScoreWeights::default(), 1)]
#[case(ScoreWeights::new(2, -1), 3)]
#[case(ScoreWeights::new(1, -5), -3)]
fn score_applies_weights(ledger: Reputation, #[case] weights: ScoreWeights, #[case] expected: i64) {
    assert_eq!(ledger.score(weights), expected);
}

#[rstest]
fn score_is_order_independent(ledger: Reputation) {
    let forward: Vec<&Impression> = ledger.impressions().collect();
    let backward: Vec<&Impression> = ledger.impressions().rev().collect();
    let weights = ScoreWeights::new(3, -2);

    assert_eq!(
        calculate(forward, weights),
        calculate(backward, weights)
    );
}

#[rstest]
fn weight_matches_polarity() {
    let weights = ScoreWeights::new(4, -7);
    assert_eq!(weights.weight(Polarity::Positive), 4);
    assert_eq!(weights.weight(Polarity::Negative), -7);
}

#[rstest]
fn vote_result_serializes_with_status_tag() {
    let accepted = serde_json::to_value(VoteResult::Accepted { was_update: true })
        .expect("serialize accepted");
    assert_eq!(accepted, json!({ "status": "accepted", "wasUpdate": true }));

    let rejected = serde_json::to_value(VoteResult::Rejected {
        reason: VoteRejection::SelfVote,
    })
    .expect("serialize rejected");
    assert_eq!(rejected, json!({ "status": "rejected", "reason": "self_vote" }));
}

#[rstest]
fn ledger_serializes_as_impression_list(ledger: Reputation) {
    let value = serde_json::to_value(&ledger).expect("serialize ledger");
    let impressions = value["impressions"].as_array().expect("impression list");
    assert_eq!(impressions.len(), 3);
    assert_eq!(impressions[0]["voterId"], "alice");
}
