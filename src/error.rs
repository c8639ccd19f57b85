//! Error types.
//!
//! Dispatch itself never fails: degenerate inputs produce empty schedules.
//! Errors are reserved for contract violations in search configuration and
//! for out-of-range machine indices on the public placement entry point.

use thiserror::Error;

/// Errors raised by scheduling and search operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("cooling rate must lie strictly between 0 and 1, got {0}")]
    InvalidCoolingRate(f64),

    #[error("initial temperature must be finite and positive, got {0}")]
    InvalidTemperature(f64),

    #[error("tabu threshold must be positive, got {0}")]
    InvalidThreshold(i64),

    #[error("machine index {index} out of range for {machines} machine(s)")]
    MachineOutOfRange { index: usize, machines: usize },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
