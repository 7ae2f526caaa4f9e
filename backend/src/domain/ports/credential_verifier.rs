//! Driven port for checking a presented password against a user.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential verifier adapters.
    pub enum CredentialVerifierError {
        /// The credential backend could not be reached.
        Unavailable { message: String } => "credential verifier unavailable: {message}",
    }
}

/// Verifies login passwords.
///
/// Returns `Ok(false)` for a mismatch. Errors are reserved for backend
/// failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, user: &User, password: &str) -> Result<bool, CredentialVerifierError>;
}

/// Compares against the credential stored on the aggregate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialVerifier;

#[async_trait]
impl CredentialVerifier for FixtureCredentialVerifier {
    async fn verify(&self, user: &User, password: &str) -> Result<bool, CredentialVerifierError> {
        Ok(user.credential().expose() == password)
    }
}
