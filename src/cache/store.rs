//! Cache Store Module
//!
//! Unsynchronized entry map used behind the expiring cache's lock.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

/// Store shared between the cache handle and its sweeper.
pub(crate) type SharedStore = Arc<RwLock<CacheStore>>;

// == Cache Store ==
/// Key-value storage of timestamped response bytes.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Stores a value, overwriting any previous entry and resetting its age.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.add_at(key, value, Instant::now());
    }

    /// Stores a value with an explicit write time.
    pub fn add_at(&mut self, key: String, value: Vec<u8>, now: Instant) {
        self.entries.insert(key, CacheEntry::created_at(value, now));
    }

    // == Get ==
    /// Returns the stored bytes for `key`, whatever their age.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|entry| entry.value.as_slice())
    }

    // == Purge Expired ==
    /// Removes every entry older than `ttl` at `now`.
    ///
    /// Keys are collected first and deleted afterwards so the map is never
    /// mutated while it is being iterated. Returns the number removed.
    pub fn purge_expired(&mut self, now: Instant, ttl: Duration) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Lock Helpers ==
// A panic while holding the lock cannot leave a half-written entry behind,
// so a poisoned lock is recovered instead of propagated.

/// Acquires shared access to the store.
pub(crate) fn read_store(store: &SharedStore) -> RwLockReadGuard<'_, CacheStore> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquires exclusive access to the store.
pub(crate) fn write_store(store: &SharedStore) -> RwLockWriteGuard<'_, CacheStore> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}
