//! The external executor contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeResult;
use crate::plan::PipelinePlan;

/// Pass/fail report from the processing backend.
///
/// The core does not interpret `message` beyond surfacing it to the user on
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Whether the pipeline completed.
    pub success: bool,
    /// Backend-provided detail, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExecutionReport {
    /// A successful report with no detail.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A failed report carrying the backend's message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// The media-processing backend boundary.
///
/// Implementations invoke whatever actually probes, transcodes and scores
/// media; this core only prepares the plan and reports the outcome upward.
#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    /// Executes a pipeline plan to completion.
    async fn execute(&self, plan: &PipelinePlan) -> RuntimeResult<ExecutionReport>;
}
