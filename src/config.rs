//! Configuration Module
//!
//! Handles loading the cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable holding the TTL in milliseconds
pub const TTL_ENV_VAR: &str = "CACHE_TTL_MS";

/// Default TTL in milliseconds
pub const DEFAULT_TTL_MS: u64 = 5_000;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL in milliseconds, also used as the sweep period
    pub ttl_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - TTL and sweep period in milliseconds (default: 5000)
    ///
    /// Unset variables fall back to their defaults. Set but unparsable
    /// values, and a zero TTL, are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self> {
        let ttl_ms = match lookup(TTL_ENV_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: TTL_ENV_VAR,
                    value,
                })?,
            None => DEFAULT_TTL_MS,
        };

        if ttl_ms == 0 {
            return Err(ConfigError::ZeroTtl);
        }

        Ok(Self { ttl_ms })
    }

    /// Returns the TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}
