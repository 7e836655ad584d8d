use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Process-wide registry of per-account mutual-exclusion locks.
///
/// A writer must hold an account's lock across "write transaction row" +
/// "recompute + write balance" for that account. Multi-account operations
/// acquire their locks in ascending account-id order; two transfers touching
/// the same pair of accounts therefore cannot deadlock.
pub struct AccountLockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccountLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Returns the shared lock handle for one account.
    pub fn handle(&self, account_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Sorts and deduplicates the ids in place, then returns their lock
    /// handles in that order. Callers take the guards in list order.
    pub fn handles_in_order(&self, account_ids: &mut Vec<String>) -> Vec<Arc<Mutex<()>>> {
        account_ids.sort();
        account_ids.dedup();
        account_ids.iter().map(|id| self.handle(id)).collect()
    }
}

impl Default for AccountLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Acquires a handle's guard, recovering from a poisoned lock.
pub fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
