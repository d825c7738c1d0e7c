//! Cache Module
//!
//! Provides a concurrent in-memory cache with age-based background expiration.

mod entry;
mod stats;
mod store;
mod ttl_cache;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::{CacheState, TtlCache};

// == Public Constants ==
/// Smallest TTL the cache accepts; shorter values are raised to it
pub const MIN_TTL: Duration = Duration::from_millis(1);

/// Largest TTL the cache accepts; longer values are lowered to it
pub const MAX_TTL: Duration = Duration::from_secs(86_400 * 365 * 30);
