//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::store::{write_store, SharedStore};
use crate::cache::StatsRecorder;

/// Spawns a background task that sweeps expired entries every `ttl`.
///
/// The first sweep happens one `ttl` after this call. Each sweep holds the
/// store's write lock for the whole scan-and-delete pass. The task exits
/// when `stop_rx` observes `true` or its sender is dropped.
///
/// Must be called from within a tokio runtime.
pub(crate) fn spawn_sweep_task(
    store: SharedStore,
    stats: Arc<StatsRecorder>,
    ttl: Duration,
    mut stop_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let first_sweep = Instant::now() + ttl;

    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", ttl);

        let mut ticker = time::interval_at(first_sweep, ttl);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = sweep(&store, ttl);
                    stats.record_sweep(removed);

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
            }
        }

        debug!("TTL sweep task stopped");
    })
}

/// Runs one sweep pass under a single exclusive acquisition.
fn sweep(store: &SharedStore, ttl: Duration) -> usize {
    let mut guard = write_store(store);
    let now = Instant::now();
    guard.purge_expired(now, ttl)
}
