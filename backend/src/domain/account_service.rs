//! Account registration and the login gate.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, CredentialVerifier, CredentialVerifierError, RegisterRequest,
    UserPersistenceError, UserRepository,
};
use crate::domain::{DomainError, LoginCredentials, Registration, User, UserId, Username};

/// Account service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService<R, V> {
    users: Arc<R>,
    verifier: Arc<V>,
}

impl<R, V> AccountService<R, V> {
    /// Service over the given user store and credential verifier.
    pub fn new(users: Arc<R>, verifier: Arc<V>) -> Self {
        Self { users, verifier }
    }
}

impl<R, V> AccountService<R, V>
where
    R: UserRepository,
    V: CredentialVerifier,
{
    fn map_persistence_error(error: UserPersistenceError) -> DomainError {
        match error {
            UserPersistenceError::Connection { message } => {
                DomainError::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                DomainError::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { username } => {
                DomainError::conflict(format!("username already registered: {username}"))
            }
            UserPersistenceError::DuplicateId { id } => {
                DomainError::service_unavailable(format!("generated user id already in use: {id}"))
            }
            UserPersistenceError::RevisionMismatch { expected, actual } => DomainError::internal(
                format!("unexpected revision mismatch: expected {expected}, found {actual}"),
            ),
        }
    }

    fn map_verifier_error(error: CredentialVerifierError) -> DomainError {
        match error {
            CredentialVerifierError::Unavailable { message } => {
                DomainError::service_unavailable(format!(
                    "credential verifier unavailable: {message}"
                ))
            }
        }
    }

    fn invalid_credentials() -> DomainError {
        DomainError::unauthorized("invalid credentials")
    }
}

#[async_trait]
impl<R, V> AccountCommand for AccountService<R, V>
where
    R: UserRepository,
    V: CredentialVerifier,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        // A taken username is a conflict whatever the password looks like.
        let taken = match Username::new(request.username.as_str()) {
            Ok(username) => self
                .users
                .exists_username(&username)
                .await
                .map_err(Self::map_persistence_error)?,
            Err(_) => false,
        };
        if taken {
            return Err(DomainError::conflict(format!(
                "username already registered: {}",
                request.username
            )));
        }

        let registration = Registration::try_from_parts(&request.username, &request.password)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        let (username, credential) = registration.into_parts();
        let user = User::register(UserId::random(), username, credential);
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(username = %user.username(), user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, DomainError> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Self::invalid_credentials());
        };
        let Some(user) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(Self::map_persistence_error)?
        else {
            debug!(username = credentials.username(), "login for unknown user");
            return Err(Self::invalid_credentials());
        };

        if !self
            .verifier
            .verify(&user, credentials.password())
            .await
            .map_err(Self::map_verifier_error)?
        {
            return Err(Self::invalid_credentials());
        }

        if user.report_status().is_banned() {
            info!(username = %user.username(), "login refused for banned user");
            return Err(DomainError::forbidden("user is banned").with_details(json!({
                "code": "user_banned",
                "username": user.username().as_ref(),
            })));
        }
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
