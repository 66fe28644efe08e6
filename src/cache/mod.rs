//! Cache Module
//!
//! Provides an in-memory response cache with age-based expiration driven by
//! a background sweeper.

mod entry;
mod expiring;
mod stats;
pub(crate) mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::ExpiringCache;
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
