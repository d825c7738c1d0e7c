//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and creation time.
///
/// Entries are immutable: re-adding a key replaces the whole entry,
/// which resets its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Bytes,
    /// Creation time on the Tokio clock
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: Bytes) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates a new cache entry with an explicit creation time.
    pub fn created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long the entry has existed at `now`.
    ///
    /// Saturates to zero if `now` is earlier than the creation time.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks if the entry is older than `ttl` at `now`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is not
    /// stale yet. Only strictly older entries are eligible for removal.
    pub fn is_stale(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) > ttl
    }
}
