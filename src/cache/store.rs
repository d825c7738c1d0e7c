//! Cache Store Module
//!
//! The mapping behind the cache: HashMap storage, statistics and the
//! per-tick sweep body. The store itself is not synchronized; the owning
//! [`TtlCache`](crate::cache::TtlCache) puts it behind a single lock.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage with age-based sweeping.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and sweep statistics
    stats: CacheStats,
    /// Staleness threshold
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries go stale after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    ///
    /// Replacing an entry resets its age.
    pub fn add(&mut self, key: String, value: Bytes) {
        self.add_at(key, value, Instant::now());
    }

    /// Inserts or replaces the entry for `key` with an explicit creation time.
    pub fn add_at(&mut self, key: String, value: Bytes, created_at: Instant) {
        self.entries.insert(key, CacheEntry::created_at(value, created_at));
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Stale entries that have not been swept yet are still returned; only
    /// the sweep removes entries.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry older than the TTL at `now`.
    ///
    /// Stale keys are collected during the scan and removed afterwards.
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let stale_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_stale(ttl, now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = stale_keys.len();

        for key in stale_keys {
            self.entries.remove(&key);
        }

        self.stats.record_sweep(count);
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
