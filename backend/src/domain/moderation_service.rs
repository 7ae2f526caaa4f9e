//! Moderation domain service.
//!
//! Implements the moderation driving ports on top of [`ModerationEngine`].
//! Every mutation runs under the per-user lock, re-reads the user, applies
//! the engine operation to a working copy, and commits the copy with a
//! revision check. Revision conflicts from writers outside this process are
//! retried a bounded number of times.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CastVoteRequest, CastVoteResponse, FileReportRequest, FileReportResponse, ModerationCommand,
    ModerationQuery, PushNotificationRequest, UserPersistenceError, UserRepository,
};
use crate::domain::user_locks::UserLocks;
use crate::domain::{
    DomainError, ModerationEngine, Notification, ReportCategory, ReportResult, SourceId, User,
    UserId, Username, VoteResult, VoterId,
};

/// Default number of retries after a revision conflict.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Moderation service implementing [`ModerationCommand`] and
/// [`ModerationQuery`].
#[derive(Clone)]
pub struct ModerationService<R> {
    users: Arc<R>,
    engine: ModerationEngine,
    locks: Arc<UserLocks>,
    clock: Arc<dyn Clock>,
    max_conflict_retries: u32,
}

impl<R> ModerationService<R> {
    /// Create a service with default retry bound and its own lock registry.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use review_backend::domain::ModerationEngine;
    /// use review_backend::domain::ModerationService;
    /// use review_backend::outbound::persistence::InMemoryUserRepository;
    ///
    /// let service = ModerationService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     ModerationEngine::default(),
    ///     Arc::new(DefaultClock),
    /// );
    /// assert_eq!(service.max_conflict_retries(), 3);
    /// ```
    pub fn new(users: Arc<R>, engine: ModerationEngine, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            engine,
            locks: Arc::new(UserLocks::new()),
            clock,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }

    /// Override how many times a conflicting commit is retried.
    #[must_use]
    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    /// Share a lock registry with other services touching the same users.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<UserLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Engine applied to every mutation.
    pub fn engine(&self) -> &ModerationEngine {
        &self.engine
    }

    /// Retries allowed after a revision conflict.
    pub fn max_conflict_retries(&self) -> u32 {
        self.max_conflict_retries
    }
}

impl<R> ModerationService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> DomainError {
        match error {
            UserPersistenceError::Connection { message } => {
                DomainError::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                DomainError::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::RevisionMismatch { expected, actual } => {
                Self::concurrent_modification(expected, actual)
            }
            UserPersistenceError::DuplicateUsername { username } => {
                DomainError::internal(format!("unexpected username conflict on update: {username}"))
            }
            UserPersistenceError::DuplicateId { id } => {
                DomainError::internal(format!("unexpected id conflict on update: {id}"))
            }
        }
    }

    fn concurrent_modification(expected: u64, actual: u64) -> DomainError {
        DomainError::service_unavailable("user was modified concurrently; try again").with_details(
            json!({
                "code": "concurrent_modification",
                "expectedRevision": expected,
                "actualRevision": actual,
            }),
        )
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, DomainError> {
        let Ok(username) = Username::new(username) else {
            return Ok(None);
        };
        self.users
            .find_by_username(&username)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn require_user(
        &self,
        username: &str,
        missing: fn(String) -> DomainError,
    ) -> Result<User, DomainError> {
        self.find_user(username)
            .await?
            .ok_or_else(|| missing(format!("user not found: {username}")))
    }

    /// Apply `operation` to a fresh copy of the user and commit it.
    ///
    /// Unchanged copies are not written. Returns the committed user and the
    /// operation's outcome.
    async fn mutate<T, F>(
        &self,
        user_id: &UserId,
        mut operation: F,
    ) -> Result<(User, T), DomainError>
    where
        F: FnMut(&ModerationEngine, &mut User, DateTime<Utc>) -> T + Send,
        T: Send,
    {
        let _guard = self.locks.acquire(user_id).await;
        let mut retries = 0_u32;
        loop {
            let current = self
                .users
                .find_by_id(user_id)
                .await
                .map_err(Self::map_persistence_error)?
                .ok_or_else(|| DomainError::not_found(format!("user not found: {user_id}")))?;

            let mut working = current.clone();
            let outcome = operation(&self.engine, &mut working, self.clock.utc());
            if working == current {
                return Ok((current, outcome));
            }
            working.advance_revision();

            match self.users.save(&working, current.revision()).await {
                Ok(()) => return Ok((working, outcome)),
                Err(UserPersistenceError::RevisionMismatch { expected, actual })
                    if retries < self.max_conflict_retries =>
                {
                    retries += 1;
                    warn!(
                        user_id = %user_id,
                        expected,
                        actual,
                        retry = retries,
                        "revision conflict on user commit; retrying"
                    );
                }
                Err(UserPersistenceError::RevisionMismatch { expected, actual }) => {
                    warn!(
                        user_id = %user_id,
                        expected,
                        actual,
                        retries,
                        "giving up on user commit after repeated revision conflicts"
                    );
                    return Err(Self::concurrent_modification(expected, actual));
                }
                Err(err) => return Err(Self::map_persistence_error(err)),
            }
        }
    }
}

#[async_trait]
impl<R> ModerationCommand for ModerationService<R>
where
    R: UserRepository,
{
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<CastVoteResponse, DomainError> {
        let voter_id = VoterId::new(request.voter_id)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let source_id = SourceId::resolve(
            request.code_review_section_id.as_deref(),
            request.snippet_id.as_deref(),
        )
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let target = self.require_user(&request.username, DomainError::not_found).await?;

        let (user, outcome) = self
            .mutate(target.id(), |engine, user, now| {
                engine.cast_vote(
                    user,
                    voter_id.clone(),
                    source_id.clone(),
                    request.polarity,
                    now,
                )
            })
            .await?;

        match outcome {
            VoteResult::Accepted { was_update } => debug!(
                username = %user.username(),
                voter_id = voter_id.as_ref(),
                source_id = source_id.as_ref(),
                was_update,
                "vote recorded"
            ),
            VoteResult::Rejected { reason } => debug!(
                username = %user.username(),
                voter_id = voter_id.as_ref(),
                ?reason,
                "vote ignored"
            ),
        }
        Ok(CastVoteResponse { user, outcome })
    }

    async fn file_report(
        &self,
        request: FileReportRequest,
    ) -> Result<FileReportResponse, DomainError> {
        let target = self.require_user(&request.username, DomainError::not_found).await?;
        let category: ReportCategory = request.report_type.parse().map_err(|err| {
            DomainError::invalid_request(format!("{err}")).with_details(json!({
                "code": "invalid_category",
                "reportType": request.report_type,
            }))
        })?;

        let (user, outcome) = self
            .mutate(target.id(), |engine, user, _| {
                engine.file_report_category(user, category)
            })
            .await?;

        let ReportResult::Recorded {
            category,
            count,
            banned,
            newly_banned,
        } = outcome
        else {
            return Err(DomainError::internal("parsed report category was rejected"));
        };
        debug!(username = %user.username(), %category, count, "report recorded");
        if newly_banned {
            info!(
                username = %user.username(),
                total_reports = user.report_status().total(),
                "user banned"
            );
        }
        Ok(FileReportResponse {
            user,
            category,
            count,
            banned,
            newly_banned,
        })
    }

    async fn push_notification(
        &self,
        request: PushNotificationRequest,
    ) -> Result<bool, DomainError> {
        let target = self
            .require_user(&request.username, DomainError::invalid_request)
            .await?;
        let notification = Notification::new(request.message, request.link, self.clock.utc())
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        let (user, ()) = self
            .mutate(target.id(), |engine, user, _| {
                engine.push_notification(user, notification.clone());
            })
            .await?;
        debug!(
            username = %user.username(),
            pending = user.notifications().len(),
            "notification appended"
        );
        Ok(true)
    }
}

#[async_trait]
impl<R> ModerationQuery for ModerationService<R>
where
    R: UserRepository,
{
    async fn score(&self, username: &str) -> Result<i64, DomainError> {
        let user = self.require_user(username, DomainError::not_found).await?;
        Ok(self.engine.score(&user))
    }

    async fn ban_status(&self, username: &str) -> Result<bool, DomainError> {
        let user = self.require_user(username, DomainError::invalid_request).await?;
        Ok(self.engine.is_banned(&user))
    }

    async fn notifications(&self, username: &str) -> Result<Vec<Notification>, DomainError> {
        let user = self.require_user(username, DomainError::invalid_request).await?;
        Ok(self.engine.notifications(&user).to_vec())
    }
}

#[cfg(test)]
#[path = "moderation_service_tests.rs"]
mod tests;
