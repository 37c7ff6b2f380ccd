//! Runtime error types.

use thiserror::Error;

use crate::plan::PlanError;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur while handing a pipeline off for execution.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A pipeline execution is already in flight.
    #[error("a pipeline execution is already in flight")]
    AlreadyRunning,

    /// The execution exceeded the configured timeout.
    #[error("pipeline execution timed out")]
    Timeout,

    /// The graph could not be turned into a runnable plan.
    #[error("invalid pipeline: {0}")]
    InvalidPlan(#[from] PlanError),

    /// The external executor raised an error. Surfaced verbatim.
    #[error("executor error: {0}")]
    Executor(String),
}
