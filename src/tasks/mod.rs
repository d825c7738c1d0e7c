//! Background Tasks Module
//!
//! Contains the task that keeps the cache free of stale entries.
//!
//! # Tasks
//! - Sweep: removes entries older than the TTL once per TTL period

mod sweep;

pub(crate) use sweep::spawn_sweep_task;
