//! Abuse reporting, ban policy, and the moderation engine.

mod ban_policy;
mod engine;
mod report;

pub use self::ban_policy::BanPolicy;
pub use self::engine::ModerationEngine;
pub use self::report::{
    ParseReportCategoryError, ReportCategory, ReportRejection, ReportResult, ReportStatus,
};
