//! End-to-end moderation scenarios against the in-memory repository.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::future::join_all;
use mockable::DefaultClock;
use review_backend::domain::ports::{
    AccountCommand, CastVoteRequest, FileReportRequest, FixtureCredentialVerifier,
    ModerationCommand, ModerationQuery, PushNotificationRequest, RegisterRequest,
    UserPersistenceError, UserRepository,
};
use review_backend::domain::{
    AccountService, BanPolicy, ErrorCode, LoginCredentials, ModerationEngine, ModerationService,
    Polarity, ReportCategory, ScoreWeights, User, UserId, Username, VoteResult,
};
use review_backend::outbound::persistence::InMemoryUserRepository;
use rstest::{fixture, rstest};

struct Harness<R> {
    accounts: AccountService<R, FixtureCredentialVerifier>,
    moderation: ModerationService<R>,
}

fn harness_over<R: UserRepository>(users: Arc<R>, engine: ModerationEngine) -> Harness<R> {
    Harness {
        accounts: AccountService::new(Arc::clone(&users), Arc::new(FixtureCredentialVerifier)),
        moderation: ModerationService::new(users, engine, Arc::new(DefaultClock)),
    }
}

#[fixture]
fn harness() -> Harness<InMemoryUserRepository> {
    harness_over(
        Arc::new(InMemoryUserRepository::new()),
        ModerationEngine::new(ScoreWeights::default(), BanPolicy::new(3)),
    )
}

async fn register<R: UserRepository>(harness: &Harness<R>, username: &str) -> User {
    harness
        .accounts
        .register(RegisterRequest {
            username: username.to_owned(),
            password: "secret".to_owned(),
        })
        .await
        .expect("registration succeeds")
}

fn vote(target: &str, voter: &str, source: &str, polarity: Polarity) -> CastVoteRequest {
    CastVoteRequest {
        username: target.to_owned(),
        voter_id: voter.to_owned(),
        code_review_section_id: None,
        snippet_id: Some(source.to_owned()),
        polarity,
    }
}

fn report(target: &str, category: &str) -> FileReportRequest {
    FileReportRequest {
        username: target.to_owned(),
        report_type: category.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn score_follows_vote_sequence(harness: Harness<InMemoryUserRepository>) {
    register(&harness, "target").await;
    let m = &harness.moderation;
    assert_eq!(m.score("target").await.expect("score"), 0);

    m.cast_vote(vote("target", "voterA", "s1", Polarity::Positive))
        .await
        .expect("vote");
    assert_eq!(m.score("target").await.expect("score"), 1);

    m.cast_vote(vote("target", "voterB", "s2", Polarity::Negative))
        .await
        .expect("vote");
    assert_eq!(m.score("target").await.expect("score"), 0);

    let changed = m
        .cast_vote(vote("target", "voterA", "s1", Polarity::Negative))
        .await
        .expect("vote");
    assert_eq!(changed.outcome, VoteResult::Accepted { was_update: true });
    assert_eq!(m.score("target").await.expect("score"), -2);
}

#[rstest]
#[tokio::test]
async fn repeated_votes_are_idempotent(harness: Harness<InMemoryUserRepository>) {
    register(&harness, "target").await;
    for _ in 0..5 {
        harness
            .moderation
            .cast_vote(vote("target", "voterA", "s1", Polarity::Positive))
            .await
            .expect("vote");
    }
    assert_eq!(harness.moderation.score("target").await.expect("score"), 1);
}

#[rstest]
#[tokio::test]
async fn self_votes_never_move_the_score(harness: Harness<InMemoryUserRepository>) {
    let target = register(&harness, "target").await;
    let response = harness
        .moderation
        .cast_vote(vote("target", target.id().as_ref(), "s1", Polarity::Positive))
        .await
        .expect("self vote is accepted as a no-op");

    assert!(!response.outcome.is_accepted());
    assert_eq!(response.user.revision(), target.revision());
    assert_eq!(harness.moderation.score("target").await.expect("score"), 0);
}

#[rstest]
#[tokio::test]
async fn reformatted_own_id_is_still_a_self_vote(harness: Harness<InMemoryUserRepository>) {
    let target = register(&harness, "target").await;
    let own_id = target.id().to_string();

    for spelling in [format!(" {own_id}"), format!("{own_id}\n"), own_id.to_uppercase()] {
        let response = harness
            .moderation
            .cast_vote(vote("target", &spelling, "s1", Polarity::Positive))
            .await
            .expect("self vote is accepted as a no-op");
        assert!(!response.outcome.is_accepted(), "{spelling:?} counted");
    }
    assert_eq!(harness.moderation.score("target").await.expect("score"), 0);
}

#[rstest]
#[tokio::test]
async fn third_spam_report_bans_and_blocks_login(harness: Harness<InMemoryUserRepository>) {
    register(&harness, "target").await;
    let m = &harness.moderation;

    for _ in 0..2 {
        let response = m.file_report(report("target", "spam")).await.expect("report");
        assert!(!response.banned);
        assert!(!m.ban_status("target").await.expect("ban status"));
    }
    let third = m.file_report(report("target", "spam")).await.expect("report");
    assert!(third.banned);
    assert!(third.newly_banned);
    assert_eq!(third.count, 3);
    assert!(m.ban_status("target").await.expect("ban status"));

    let fourth = m
        .file_report(report("target", "misleading"))
        .await
        .expect("report");
    assert!(fourth.banned);
    assert!(!fourth.newly_banned);

    let error = harness
        .accounts
        .login(&LoginCredentials::try_from_parts("target", "secret").expect("credentials"))
        .await
        .expect_err("banned user cannot log in");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn invalid_category_leaves_counts_unchanged(harness: Harness<InMemoryUserRepository>) {
    register(&harness, "target").await;
    let m = &harness.moderation;
    m.file_report(report("target", "spam")).await.expect("report");

    let error = m
        .file_report(report("target", "nonsense"))
        .await
        .expect_err("invalid category");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);

    let next = m
        .file_report(report("target", "badLanguage"))
        .await
        .expect("report");
    assert_eq!(next.category, ReportCategory::BadLanguage);
    assert_eq!(next.count, 1);
    assert_eq!(next.user.report_status().total(), 2);
}

#[rstest]
#[tokio::test]
async fn notifications_are_kept_in_order(harness: Harness<InMemoryUserRepository>) {
    register(&harness, "target").await;
    for message in ["first", "second", "first"] {
        let pushed = harness
            .moderation
            .push_notification(PushNotificationRequest {
                username: "target".to_owned(),
                message: message.to_owned(),
                link: Some("/snippets/1".to_owned()),
            })
            .await
            .expect("notification");
        assert!(pushed);
    }

    let messages: Vec<String> = harness
        .moderation
        .notifications("target")
        .await
        .expect("notifications")
        .iter()
        .map(|note| note.message().to_owned())
        .collect();
    assert_eq!(messages, ["first", "second", "first"]);
}

#[rstest]
#[tokio::test]
async fn registration_and_login_rules(harness: Harness<InMemoryUserRepository>) {
    register(&harness, "ada").await;

    let duplicate = harness
        .accounts
        .register(RegisterRequest {
            username: "ada".to_owned(),
            password: "other".to_owned(),
        })
        .await
        .expect_err("duplicate username");
    assert_eq!(duplicate.code(), ErrorCode::Conflict);

    let wrong = harness
        .accounts
        .login(&LoginCredentials::try_from_parts("ada", "nope").expect("credentials"))
        .await
        .expect_err("wrong password");
    assert_eq!(wrong.code(), ErrorCode::Unauthorized);

    let user = harness
        .accounts
        .login(&LoginCredentials::try_from_parts("ada", "secret").expect("credentials"))
        .await
        .expect("login");
    assert_eq!(user.username().as_ref(), "ada");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_votes_are_never_lost() {
    let harness = Arc::new(harness_over(
        Arc::new(InMemoryUserRepository::new()),
        ModerationEngine::default(),
    ));
    let target = register(&harness, "target").await;

    let tasks: Vec<_> = (0..32)
        .map(|voter| {
            let harness = Arc::clone(&harness);
            tokio::spawn(async move {
                harness
                    .moderation
                    .cast_vote(vote(
                        "target",
                        &format!("voter{voter}"),
                        "s1",
                        Polarity::Positive,
                    ))
                    .await
            })
        })
        .collect();
    for outcome in join_all(tasks).await {
        outcome.expect("task completes").expect("vote succeeds");
    }

    assert_eq!(harness.moderation.score("target").await.expect("score"), 32);
    let stored = harness
        .accounts
        .login(&LoginCredentials::try_from_parts("target", "secret").expect("credentials"))
        .await
        .expect("target can still log in");
    assert_eq!(stored.id(), target.id());
    assert_eq!(stored.revision(), 33);
}

/// Simulates a writer in another process that bumps the stored revision
/// right before the first commit.
struct InterleavedWriter {
    inner: InMemoryUserRepository,
    interfered: AtomicBool,
}

#[async_trait]
impl UserRepository for InterleavedWriter {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.inner.find_by_username(username).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.inner.find_by_id(id).await
    }

    async fn exists_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        self.inner.exists_username(username).await
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.inner.insert(user).await
    }

    async fn save(&self, user: &User, expected_revision: u64) -> Result<(), UserPersistenceError> {
        if !self.interfered.swap(true, Ordering::SeqCst) {
            self.inner.save(user, expected_revision).await?;
        }
        self.inner.save(user, expected_revision).await
    }
}

/// Rejects every commit as stale.
struct AlwaysStale {
    inner: InMemoryUserRepository,
}

#[async_trait]
impl UserRepository for AlwaysStale {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.inner.find_by_username(username).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.inner.find_by_id(id).await
    }

    async fn exists_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        self.inner.exists_username(username).await
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.inner.insert(user).await
    }

    async fn save(&self, _user: &User, expected_revision: u64) -> Result<(), UserPersistenceError> {
        Err(UserPersistenceError::revision_mismatch(
            expected_revision,
            expected_revision + 1,
        ))
    }
}

#[tokio::test]
async fn external_write_is_retried_on_fresh_state() {
    let harness = harness_over(
        Arc::new(InterleavedWriter {
            inner: InMemoryUserRepository::new(),
            interfered: AtomicBool::new(false),
        }),
        ModerationEngine::default(),
    );
    register(&harness, "target").await;

    let response = harness
        .moderation
        .file_report(report("target", "spam"))
        .await
        .expect("report lands after retry");

    // The interfering write already recorded one spam report.
    assert_eq!(response.count, 2);
    assert_eq!(response.user.revision(), 3);
}

#[tokio::test]
async fn persistent_conflicts_fail_after_bounded_retries() {
    let harness = harness_over(
        Arc::new(AlwaysStale {
            inner: InMemoryUserRepository::new(),
        }),
        ModerationEngine::default(),
    );
    register(&harness, "target").await;

    let error = harness
        .moderation
        .cast_vote(vote("target", "voterA", "s1", Polarity::Positive))
        .await
        .expect_err("conflicts persist");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(
        error.details().and_then(|details| details["code"].as_str()),
        Some("concurrent_modification")
    );
}
