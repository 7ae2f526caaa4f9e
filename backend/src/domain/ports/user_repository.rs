//! Port abstraction for user persistence adapters and their errors.
//!
//! Users are stored whole: the reputation ledger, report status, and
//! notifications travel with the aggregate. Writes after registration go
//! through [`UserRepository::save`], which enforces optimistic concurrency.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the username.
        DuplicateUsername { username: String } =>
            "username already registered: {username}",
        /// Another user already holds the identifier.
        DuplicateId { id: String } => "user id already registered: {id}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u64, actual: u64 } =>
            "revision mismatch: expected {expected}, found {actual}",
    }
}

/// Port for user storage and retrieval.
///
/// # Revision Semantics
///
/// - Inserted users carry revision 1.
/// - The caller bumps `user.revision()` before calling
///   [`UserRepository::save`]; the repository does not auto-increment.
/// - `save` succeeds only when the stored revision equals
///   `expected_revision`, otherwise it returns
///   [`UserPersistenceError::RevisionMismatch`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Whether the username is already taken.
    async fn exists_username(&self, username: &Username) -> Result<bool, UserPersistenceError>;

    /// Store a newly registered user.
    ///
    /// Fails with [`UserPersistenceError::DuplicateId`] or
    /// [`UserPersistenceError::DuplicateUsername`] when either is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace a stored user after a revision check.
    async fn save(&self, user: &User, expected_revision: u64)
    -> Result<(), UserPersistenceError>;
}

/// Fixture implementation for tests that never look a user up.
///
/// Lookups return `None` and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_username(
        &self,
        _username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn exists_username(&self, _username: &Username) -> Result<bool, UserPersistenceError> {
        Ok(false)
    }

    async fn insert(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn save(
        &self,
        _user: &User,
        _expected_revision: u64,
    ) -> Result<(), UserPersistenceError> {
        Ok(())
    }
}
