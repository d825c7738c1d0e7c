//! Sweep Task
//!
//! Background task that periodically removes stale cache entries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps stale entries out of `store`.
///
/// The first pass runs one full `period` after this call and then once per
/// `period`. Each pass holds the store lock for the whole scan, so callers
/// never observe a half-swept mapping.
///
/// The task exits when `shutdown` flips to `true` or its sender is dropped.
/// A pass that is already running always completes first.
///
/// # Arguments
/// * `store` - the shared store, also locked by `add`/`get`
/// * `period` - time between passes, must be non-zero
/// * `shutdown` - stop signal owned by the cache handle
/// * `handle` - runtime the task is spawned onto
pub(crate) fn spawn_sweep_task(
    store: Arc<Mutex<CacheStore>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    handle: &Handle,
) -> JoinHandle<()> {
    let start = Instant::now() + period;

    handle.spawn(async move {
        info!("Starting sweep task with period of {:?}", period);

        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                // Err means the owning cache is gone, which also ends the task
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }

            let removed = {
                let mut store = store.lock();
                store.sweep_expired(Instant::now())
            };

            if removed > 0 {
                info!("Sweep: removed {} stale entries", removed);
            } else {
                debug!("Sweep: no stale entries found");
            }
        }

        info!("Sweep task stopped");
    })
}
