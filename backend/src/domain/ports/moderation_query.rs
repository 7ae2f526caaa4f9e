//! Driving port for moderation reads.

use async_trait::async_trait;

use crate::domain::{DomainError, Notification};

/// Domain use-case port for reputation, ban, and notification queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationQuery: Send + Sync {
    /// Reputation score. Unknown users yield `NotFound`.
    async fn score(&self, username: &str) -> Result<i64, DomainError>;

    /// Cached ban flag. Unknown users yield `InvalidRequest`.
    async fn ban_status(&self, username: &str) -> Result<bool, DomainError>;

    /// Notifications in arrival order. Unknown users yield `InvalidRequest`.
    async fn notifications(
        &self,
        username: &str,
    ) -> Result<Vec<Notification>, DomainError>;
}
