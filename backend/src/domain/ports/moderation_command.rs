//! Driving port for moderation mutations.
//!
//! Inbound adapters call [`ModerationCommand`] to vote on, report, and notify
//! users identified by username. Implementations serialise operations per
//! user and commit each one atomically.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Polarity, ReportCategory, User, VoteResult};

/// Request to vote on content owned by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    /// Owner of the voted-on content.
    pub username: String,
    /// Identifier of the voting user.
    pub voter_id: String,
    /// Code-review section being voted on. Wins over `snippet_id`.
    #[serde(default)]
    pub code_review_section_id: Option<String>,
    /// Snippet being voted on.
    #[serde(default)]
    pub snippet_id: Option<String>,
    /// Vote direction.
    pub polarity: Polarity,
}

/// Response from casting a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteResponse {
    /// The target user after the vote.
    pub user: User,
    /// Whether the vote was stored, replaced, or ignored.
    pub outcome: VoteResult,
}

/// Request to report `username` for abuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReportRequest {
    /// Reported user.
    pub username: String,
    /// Raw report category, validated by the service.
    pub report_type: String,
}

/// Response from filing a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReportResponse {
    /// The reported user after the report.
    pub user: User,
    /// Category the report was counted under.
    pub category: ReportCategory,
    /// Count for that category after this report.
    pub count: u32,
    /// Whether the user is banned after this report.
    pub banned: bool,
    /// Whether this report caused the ban.
    pub newly_banned: bool,
}

/// Request to append a notification for `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationRequest {
    /// Recipient.
    pub username: String,
    /// Notification text.
    pub message: String,
    /// Optional reference to the snippet or review concerned.
    #[serde(default)]
    pub link: Option<String>,
}

/// Domain use-case port for moderation mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationCommand: Send + Sync {
    /// Record or replace a vote.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the target user does not exist.
    /// - `InvalidRequest` when the voter id is blank or no source is named.
    /// - `ServiceUnavailable` when concurrent writers keep winning.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<CastVoteResponse, DomainError>;

    /// File an abuse report.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the reported user does not exist.
    /// - `InvalidRequest` with `details.code = "invalid_category"` for an
    ///   unknown category.
    async fn file_report(
        &self,
        request: FileReportRequest,
    ) -> Result<FileReportResponse, DomainError>;

    /// Append a notification.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the user does not exist or the message is blank.
    async fn push_notification(
        &self,
        request: PushNotificationRequest,
    ) -> Result<bool, DomainError>;
}
