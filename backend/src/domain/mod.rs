//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the user aggregate with its reputation ledger, report
//! status, and notifications, the synchronous moderation engine over it, and
//! the async services that implement the driving ports.
//!
//! Public surface:
//! - DomainError: transport-agnostic error payload.
//! - ErrorCode: stable error identifier.
//! - User: aggregate root owning all moderation state.
//! - ModerationEngine: vote, report, ban, and notification rules.
//! - ModerationService / AccountService: port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod moderation;
pub mod moderation_service;
pub mod notification;
pub mod ports;
pub mod reputation;
pub mod user;
pub mod user_locks;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, Registration};
pub use self::error::{DomainError, ErrorCode, ErrorValidationError};
pub use self::moderation::{
    BanPolicy, ModerationEngine, ParseReportCategoryError, ReportCategory, ReportRejection,
    ReportResult, ReportStatus,
};
pub use self::moderation_service::{DEFAULT_MAX_CONFLICT_RETRIES, ModerationService};
pub use self::notification::{Notification, NotificationValidationError};
pub use self::reputation::{
    Impression, Polarity, Reputation, ScoreWeights, SourceId, VoteRejection, VoteResult,
    VoteValidationError, VoterId, calculate,
};
pub use self::user::{Credential, User, UserId, UserValidationError, Username};
pub use self::user_locks::{UserLockGuard, UserLocks};
