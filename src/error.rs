//! Error types for the cache crate
//!
//! Cache operations themselves never fail; errors only arise while loading
//! configuration and driving the inspection shell.

use thiserror::Error;

// == Config Error Enum ==
/// Errors raised while loading [`Config`](crate::Config).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    /// The configured TTL is zero
    #[error("TTL must be greater than zero")]
    ZeroTtl,
}

// == Shell Error Enum ==
/// Errors raised while parsing an inspection shell command line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellError {
    /// The first word is not a known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument is missing
    #[error("Usage: {0}")]
    Usage(&'static str),
}

// == Result Type Alias ==
/// Convenience Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
