//! TTL Cache Module
//!
//! The public cache handle: owns the locked store and the background sweep
//! task, and is the only way to stop that task.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::cache::{CacheStats, CacheStore, MAX_TTL, MIN_TTL};
use crate::config::Config;
use crate::tasks::spawn_sweep_task;

// == Cache State ==
/// Lifecycle state of a [`TtlCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// The sweep task is running or about to run.
    Active,
    /// The sweep task has been told to stop, or has already exited.
    Stopped,
}

// == TTL Cache ==
/// A thread-safe byte cache that discards entries older than its TTL.
///
/// The TTL is also the sweep period, so an entry lives somewhere in
/// `[ttl, 2 * ttl)` before it disappears: it is never removed before `ttl`
/// has elapsed, but it may stay visible for almost another full period.
///
/// `add` and `get` are synchronous and never fail. They share one lock with
/// the sweep task, so all operations form a single total order.
///
/// Dropping the cache stops the sweep task. Share it with `Arc` when several
/// threads need it.
///
/// # Example
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use std::time::Duration;
/// use pokecache::TtlCache;
///
/// let cache = TtlCache::new(Duration::from_secs(5));
/// cache.add("pikachu", vec![1u8, 2, 3]);
///
/// assert_eq!(cache.get("pikachu").as_deref(), Some(&[1u8, 2, 3][..]));
/// assert_eq!(cache.get("mew"), None);
///
/// cache.shutdown().await;
/// # }
/// ```
#[derive(Debug)]
pub struct TtlCache {
    /// Entries and statistics, shared with the sweep task
    store: Arc<Mutex<CacheStore>>,
    /// Staleness threshold and sweep period
    ttl: Duration,
    /// Stop signal observed by the sweep task
    shutdown: watch::Sender<bool>,
    /// Sweep task handle, taken by `shutdown`
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl TtlCache {
    // == Constructors ==
    /// Creates an empty cache and starts its sweep task on the current runtime.
    ///
    /// The `ttl` is clamped to [`MIN_TTL`]..=[`MAX_TTL`], so a zero TTL becomes
    /// one millisecond and an unbounded one thirty years.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime. Use
    /// [`with_handle`](Self::with_handle) from plain threads.
    pub fn new(ttl: Duration) -> Self {
        Self::with_handle(ttl, &Handle::current())
    }

    /// Creates an empty cache whose sweep task runs on `handle`.
    pub fn with_handle(ttl: Duration, handle: &Handle) -> Self {
        let ttl = ttl.clamp(MIN_TTL, MAX_TTL);
        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (shutdown, signal) = watch::channel(false);
        let sweeper = spawn_sweep_task(store.clone(), ttl, signal, handle);

        Self {
            store,
            ttl,
            shutdown,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Creates a cache on the current runtime using the configured TTL.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ttl())
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// A replaced entry starts aging from zero again.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        trace!(key = %key, "add");
        self.store.lock().add(key, value.into());
    }

    // == Get ==
    /// Returns the value stored under `key`, or `None` if it was never added
    /// or has already been swept.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let value = self.store.lock().get(key);
        trace!(key, found = value.is_some(), "get");
        value
    }

    // == Close ==
    /// Signals the sweep task to stop. Idempotent and callable from any thread.
    ///
    /// Entries already in the cache stay readable, but nothing expires them
    /// any more.
    pub fn close(&self) {
        if self.shutdown.send_replace(true) {
            debug!("Cache already closed");
        } else {
            info!("Closing cache");
        }
    }

    /// Closes the cache and waits for the sweep task to exit.
    pub async fn shutdown(&self) {
        self.close();

        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            if let Err(err) = sweeper.await {
                warn!("Sweep task ended abnormally: {}", err);
            }
        }
    }

    // == Introspection ==
    pub fn state(&self) -> CacheState {
        let finished = self
            .sweeper
            .lock()
            .as_ref()
            .map_or(true, |sweeper| sweeper.is_finished());

        if self.is_closed() || finished {
            CacheState::Stopped
        } else {
            CacheState::Active
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}
