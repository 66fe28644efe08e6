//! Expiring Cache Module
//!
//! Thread-safe response cache whose entries are swept once they outlive a
//! fixed TTL.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::store::{read_store, write_store, SharedStore};
use crate::cache::{CacheStats, CacheStore, StatsRecorder};
use crate::error::CacheError;
use crate::tasks::spawn_sweep_task;

// == Expiring Cache ==
/// In-memory cache of response bytes keyed by request URL.
///
/// Each instance owns one background sweeper that wakes every `ttl` and
/// removes entries older than `ttl`. Reads never check age themselves, so an
/// entry stays visible until the next sweep after it expires.
///
/// The sweeper stops on [`ExpiringCache::stop`], on
/// [`ExpiringCache::shutdown`], or when the cache is dropped.
pub struct ExpiringCache {
    store: SharedStore,
    stats: Arc<StatsRecorder>,
    ttl: Duration,
    stop_tx: watch::Sender<bool>,
    sweeper: JoinHandle<()>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates a cache and starts its sweeper on the current tokio runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidTtl`] if `ttl` is zero.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(ttl));
        }

        let store: SharedStore = Arc::new(RwLock::new(CacheStore::new()));
        let stats = Arc::new(StatsRecorder::new());
        let (stop_tx, stop_rx) = watch::channel(false);
        let sweeper = spawn_sweep_task(store.clone(), stats.clone(), ttl, stop_rx);

        Ok(Self {
            store,
            stats,
            ttl,
            stop_tx,
            sweeper,
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry's age restarts from zero even when the key already existed.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        debug!(key = %key, "Cache add");
        write_store(&self.store).add(key, value.into());
    }

    // == Get ==
    /// Returns a copy of the bytes stored under `key`.
    ///
    /// Returns `None` if the key was never added or has already been swept.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = read_store(&self.store).get(key).map(<[u8]>::to_vec);

        if value.is_some() {
            self.stats.record_hit();
            debug!(key, "Cache hit");
        } else {
            self.stats.record_miss();
            debug!(key, "Cache miss");
        }

        value
    }

    // == Accessors ==
    /// TTL this cache was built with, also its sweep period.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current number of entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        read_store(&self.store).len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        read_store(&self.store).is_empty()
    }

    /// Snapshot of hit, miss and sweep counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    // == Lifecycle ==
    /// Signals the sweeper to exit.
    ///
    /// The cache keeps serving reads and writes; entries just stop expiring.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Returns true while the sweeper task is alive.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.is_finished()
    }

    /// Stops the sweeper and waits for it to finish.
    pub async fn shutdown(self) {
        self.stop_tx.send_replace(true);

        if let Err(e) = self.sweeper.await {
            warn!("TTL sweep task ended abnormally: {}", e);
        }
    }
}

impl fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .field("sweeping", &self.is_sweeping())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const TTL: Duration = Duration::from_millis(100);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let result = ExpiringCache::new(Duration::ZERO);
        assert_eq!(result.err(), Some(CacheError::InvalidTtl(Duration::ZERO)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_then_get() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("https://pokeapi.co/api/v2/location-area", vec![1, 2, 3]);

        assert_eq!(
            cache.get("https://pokeapi.co/api/v2/location-area"),
            Some(vec![1, 2, 3])
        );
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_unknown_key() {
        let cache = ExpiringCache::new(TTL).unwrap();

        assert!(cache.get("never-added").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_value_is_a_hit() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("empty", Vec::new());

        assert_eq!(cache.get("empty"), Some(Vec::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_swept_after_ttl() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("a", vec![1, 2, 3]);

        sleep(ms(95)).await;
        assert_eq!(cache.get("a"), Some(vec![1, 2, 3]));

        // Sweeps at 100ms and 200ms; the second one sees age > ttl
        sleep(ms(155)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_readable_until_sweep() {
        let cache = ExpiringCache::new(TTL).unwrap();

        sleep(ms(10)).await;
        cache.add("a", b"stale".to_vec());

        // At 150ms the entry is 140ms old but the last sweep (100ms) saw 90ms
        sleep(ms(140)).await;
        assert_eq!(cache.get("a"), Some(b"stale".to_vec()));
        assert_eq!(cache.get("a"), Some(b"stale".to_vec()));

        // Sweep at 200ms sees 190ms
        sleep(ms(60)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_age() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("k", b"v1".to_vec());
        sleep(ms(50)).await;
        cache.add("k", b"v2".to_vec());

        // Sweep at 100ms measures age from the overwrite at 50ms
        sleep(ms(60)).await;
        assert_eq!(cache.get("k"), Some(b"v2".to_vec()));

        // Sweep at 200ms sees 150ms
        sleep(ms(100)).await;
        assert!(cache.get("k").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_track_hits_misses_and_sweeps() {
        let cache = ExpiringCache::new(TTL).unwrap();

        cache.add("a", vec![1]);
        cache.get("a");
        cache.get("b");

        sleep(ms(250)).await;
        cache.get("a");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.sweeps, 2);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_keeps_entries_readable() {
        let cache = ExpiringCache::new(TTL).unwrap();
        assert!(cache.is_sweeping());

        cache.add("a", vec![9]);
        cache.stop();

        sleep(ms(500)).await;

        assert!(!cache.is_sweeping());
        assert_eq!(cache.get("a"), Some(vec![9]));
        cache.add("b", vec![10]);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_joins_sweeper() {
        let cache = ExpiringCache::new(TTL).unwrap();
        cache.add("a", vec![1]);

        cache.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_writers_and_readers() {
        const WRITERS: usize = 4;
        const READERS: usize = 4;
        const KEYS_PER_WRITER: usize = 500;

        let cache = Arc::new(ExpiringCache::new(ms(5)).unwrap());

        fn value_for(key: &str) -> Vec<u8> {
            format!("payload-for-{}", key).into_bytes()
        }

        let mut handles = Vec::new();

        for writer in 0..WRITERS {
            let cache = cache.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                for i in 0..KEYS_PER_WRITER {
                    let key = format!("w{}-{}", writer, i);
                    let value = value_for(&key);
                    cache.add(key, value);
                }
            }));
        }

        for reader in 0..READERS {
            let cache = cache.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                for i in 0..KEYS_PER_WRITER {
                    let key = format!("w{}-{}", (reader + i) % WRITERS, i);
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(value, value_for(&key), "corrupted value for {}", key);
                    }
                }
            }));
        }

        for handle in handles {
            handle.await.expect("worker panicked");
        }

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, (READERS * KEYS_PER_WRITER) as u64);
        assert!(stats.total_entries <= WRITERS * KEYS_PER_WRITER);
    }
}
