//! Core error types for dayplan-core.
//!
//! The scheduler is a closed-world computation, so every failure here is a
//! caller input problem surfaced before any state is touched.

use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Daily capacity must be a positive number of hours.
    #[error("daily work hours must be positive, got {0}")]
    NonPositiveCapacity(f64),

    /// The scheduling horizon must cover at least one day.
    #[error("scheduling horizon must be at least one day")]
    EmptyHorizon,

    /// A task was constructed with a non-positive effort estimate.
    #[error("estimated hours for task '{task_id}' must be positive, got {hours}")]
    NonPositiveEstimate { task_id: String, hours: f64 },
}

/// Result type alias for SchedulerError.
pub type Result<T, E = SchedulerError> = std::result::Result<T, E>;
