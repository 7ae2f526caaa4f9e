//! User aggregate and its identity primitives.
//!
//! A [`User`] owns its reputation ledger, report status, and notification
//! sequence outright. Those sub-objects are readable from anywhere but only
//! mutable inside the crate, through the moderation engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::moderation::ReportStatus;
use crate::domain::notification::Notification;
use crate::domain::reputation::Reputation;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 12;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 3;
/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 12;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameMustStartWithLetter,
    UsernameInvalidCharacters,
    PasswordTooShort { min: usize },
    PasswordTooLong { max: usize },
    PasswordInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameMustStartWithLetter => write!(f, "username must start with a letter"),
            Self::UsernameInvalidCharacters => {
                write!(f, "username may only contain letters and numbers")
            }
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
            Self::PasswordInvalidCharacters => {
                write!(f, "password may only contain letters and numbers")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Unique, human-chosen login name.
///
/// ## Invariants
/// - Between [`USERNAME_MIN`] and [`USERNAME_MAX`] characters.
/// - ASCII letters and digits only, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        if !username.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(UserValidationError::UsernameMustStartWithLetter);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Opaque credential material handed to the credential verifier.
///
/// Never serialised and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Validate a raw password against the registration rules.
    pub fn from_password(password: &str) -> Result<Self, UserValidationError> {
        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(UserValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UserValidationError::PasswordInvalidCharacters);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Raw secret for credential verifier adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Platform user aggregate.
///
/// ## Invariants
/// - `id` and `username` never change after creation.
/// - `revision` starts at 1 and grows by one with every committed mutation.
/// - Reputation, report status, and notifications start empty and are only
///   mutated through [`crate::domain::ModerationEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    #[serde(skip)]
    credential: Credential,
    reputation: Reputation,
    report: ReportStatus,
    notifications: Vec<Notification>,
    revision: u64,
}

impl User {
    /// Create a fresh user with an empty ledger, reports, and notifications.
    pub fn register(id: UserId, username: Username, credential: Credential) -> Self {
        Self {
            id,
            username,
            credential,
            reputation: Reputation::default(),
            report: ReportStatus::default(),
            notifications: Vec::new(),
            revision: 1,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Opaque credential material.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Impressions received from other users.
    pub fn reputation(&self) -> &Reputation {
        &self.reputation
    }

    /// Abuse reports filed against the user.
    pub fn report_status(&self) -> &ReportStatus {
        &self.report
    }

    /// Notifications in insertion order.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Optimistic concurrency revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn reputation_mut(&mut self) -> &mut Reputation {
        &mut self.reputation
    }

    pub(crate) fn report_status_mut(&mut self) -> &mut ReportStatus {
        &mut self.report
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut Vec<Notification> {
        &mut self.notifications
    }

    pub(crate) fn advance_revision(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }
}

#[cfg(test)]
mod tests;
