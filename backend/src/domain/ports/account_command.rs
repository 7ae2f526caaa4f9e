//! Driving port for account registration and login.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, LoginCredentials, User};

/// Raw registration payload, validated by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Domain use-case port for account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a user with empty reputation, reports, and notifications.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when the username or password format is wrong.
    /// - `Conflict` when the username is taken.
    /// - `ServiceUnavailable` when the generated id collides.
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError>;

    /// Authenticate and return the user.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for an unknown user or a wrong password.
    /// - `Forbidden` with `details.code = "user_banned"` for a banned user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, DomainError>;
}
