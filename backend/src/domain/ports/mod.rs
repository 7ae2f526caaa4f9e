//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`ModerationCommand`], [`ModerationQuery`],
//! [`AccountCommand`]) are implemented by the domain services. Driven ports
//! ([`UserRepository`], [`CredentialVerifier`]) are implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod credential_verifier;
mod moderation_command;
mod moderation_query;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, RegisterRequest};
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{
    CredentialVerifier, CredentialVerifierError, FixtureCredentialVerifier,
};
#[cfg(test)]
pub use moderation_command::MockModerationCommand;
pub use moderation_command::{
    CastVoteRequest, CastVoteResponse, FileReportRequest, FileReportResponse, ModerationCommand,
    PushNotificationRequest,
};
#[cfg(test)]
pub use moderation_query::MockModerationQuery;
pub use moderation_query::ModerationQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
