//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use mixdown_runtime::prelude::*;
//! ```

pub use crate::error::{RuntimeError, RuntimeResult};
pub use crate::executor::{ExecutionReport, PipelineExecutor};
pub use crate::handoff::{HandoffConfig, HandoffConfigBuilder, PipelineHandoff};
pub use crate::plan::{PipelinePlan, PlanError};
