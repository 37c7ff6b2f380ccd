#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
pub mod executor;
pub mod handoff;
pub mod plan;

#[doc(hidden)]
pub mod prelude;

pub use error::{RuntimeError, RuntimeResult};
pub use executor::{ExecutionReport, PipelineExecutor};
pub use handoff::{HandoffConfig, PipelineHandoff};
pub use plan::{PipelinePlan, PlanError};

/// Tracing target for runtime operations.
pub const TRACING_TARGET: &str = "mixdown_runtime";
