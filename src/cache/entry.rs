//! Cache Entry Module
//!
//! Defines the structure for individual cache entries timestamped at write.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with its payload and write time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response bytes
    pub value: Vec<u8>,
    /// When the entry was inserted or last overwritten
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: Vec<u8>) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates a new cache entry stamped with an explicit time.
    pub fn created_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between the write and `now`.
    ///
    /// Saturates to zero if `now` precedes the write.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// live; only a strictly greater age expires it.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}
