//! pokecache - A concurrent in-memory cache with age-based expiration
//!
//! Stores byte values under string keys and drops entries older than a
//! single process-wide TTL from a background sweep task.

pub mod cache;
pub mod config;
pub mod error;
pub mod shell;
mod tasks;

pub use cache::{CacheState, CacheStats, TtlCache};
pub use config::Config;
pub use error::{ConfigError, ShellError};
