//! Process-local user repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    ids_by_username: HashMap<Username, UserId>,
}

/// [`UserRepository`] backed by in-process maps.
///
/// Enforces the same uniqueness and revision rules a durable adapter must,
/// so services behave identically against it.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Users>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.by_id.is_empty()
    }

    /// Snapshot of every stored user, ordered by username.
    pub async fn all(&self) -> Vec<User> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.by_id.values().cloned().collect();
        all.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        all
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .ids_by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users.read().await.by_id.get(id).cloned())
    }

    async fn exists_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        Ok(self
            .users
            .read()
            .await
            .ids_by_username
            .contains_key(username))
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        if users.by_id.contains_key(user.id()) {
            return Err(UserPersistenceError::duplicate_id(user.id().as_ref()));
        }
        if users.ids_by_username.contains_key(user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        users
            .ids_by_username
            .insert(user.username().clone(), user.id().clone());
        users.by_id.insert(user.id().clone(), user.clone());
        debug!(user_id = %user.id(), username = %user.username(), "user inserted");
        Ok(())
    }

    async fn save(&self, user: &User, expected_revision: u64) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        let Some(stored) = users.by_id.get_mut(user.id()) else {
            return Err(UserPersistenceError::query(format!(
                "user {} does not exist",
                user.id()
            )));
        };
        if stored.revision() != expected_revision {
            return Err(UserPersistenceError::revision_mismatch(
                expected_revision,
                stored.revision(),
            ));
        }
        *stored = user.clone();
        debug!(user_id = %user.id(), revision = user.revision(), "user saved");
        Ok(())
    }
}
