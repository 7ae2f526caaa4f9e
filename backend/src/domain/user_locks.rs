//! Per-user mutual exclusion for domain services.
//!
//! Operations on the same user queue behind one async mutex; operations on
//! different users never contend. A releasing holder removes the entry when
//! no waiter references it. A waiter cancelled after that check leaves its
//! entry behind until the next release for the same user, so the registry
//! holds at most one stale entry per user.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::UserId;

/// Registry of per-user locks.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLocks {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other operation holds `user_id`, then hold it until the
    /// returned guard drops.
    pub async fn acquire(&self, user_id: &UserId) -> UserLockGuard<'_> {
        let lock = Arc::clone(
            self.locks
                .entry(user_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let guard = lock.lock_owned().await;
        UserLockGuard {
            registry: self,
            user_id: user_id.clone(),
            guard: Some(guard),
        }
    }

    /// Number of users with a live entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// `true` when no user has a live entry.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive hold on one user. Releases on drop.
#[derive(Debug)]
pub struct UserLockGuard<'a> {
    registry: &'a UserLocks,
    user_id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserLockGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex before checking whether anyone else still
        // references the entry.
        drop(self.guard.take());
        self.registry
            .locks
            .remove_if(&self.user_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
