//! Top-level errors for constructing the simulator.
//!
//! Runtime operations never fail with these: rejected placements become
//! `REJECTED` orders, and cancel/modify report `false`.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised when building an `OrderSimulator`.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The simulator schedules timers and must be created inside a Tokio runtime.
    #[error("Order simulator requires a Tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// The supplied configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
