//! The pipeline handoff service.

use std::sync::Arc;
use std::time::Duration;

use derive_builder::Builder;
use tokio::sync::Semaphore;

use crate::error::{RuntimeError, RuntimeResult};
use crate::executor::{ExecutionReport, PipelineExecutor};
use crate::plan::PipelinePlan;

const TRACING_TARGET: &str = "mixdown_runtime::handoff";

/// Configuration for the pipeline handoff.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct HandoffConfig {
    /// Maximum number of concurrent pipeline executions.
    ///
    /// Defaults to 1: starting a second run while one is in flight fails
    /// fast with [`RuntimeError::AlreadyRunning`] instead of queueing, so
    /// callers cannot rely on UI state to prevent overlapping runs.
    #[builder(default = "1")]
    pub max_concurrent_runs: usize,

    /// Optional wall-clock limit for a single execution.
    #[builder(default)]
    pub timeout: Option<Duration>,
}

impl HandoffConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_concurrent_runs {
            if max == 0 {
                return Err("max_concurrent_runs must be at least 1".into());
            }
        }
        Ok(())
    }
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            max_concurrent_runs: 1,
            timeout: None,
        }
    }
}

/// Hands validated pipeline plans to the external executor.
///
/// The graph is never mutated here: a plan is an owned snapshot, the
/// executor's report is surfaced verbatim, and write-back of per-node
/// results stays with the caller (`GraphStore::apply_node_result`), which
/// drops results for nodes deleted while the run was in flight.
pub struct PipelineHandoff<E> {
    executor: E,
    config: HandoffConfig,
    permits: Arc<Semaphore>,
}

impl<E: PipelineExecutor> PipelineHandoff<E> {
    /// Creates a handoff with default configuration.
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, HandoffConfig::default())
    }

    /// Creates a handoff with custom configuration.
    pub fn with_config(executor: E, config: HandoffConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_runs));
        Self {
            executor,
            config,
            permits,
        }
    }

    /// Returns the handoff configuration.
    pub fn config(&self) -> &HandoffConfig {
        &self.config
    }

    /// Returns the number of available execution slots.
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    /// Executes a plan through the external backend.
    ///
    /// Fails fast with [`RuntimeError::AlreadyRunning`] when every execution
    /// slot is taken. Executor errors and failed reports are surfaced
    /// verbatim; the caller's graph is exactly as it was either way.
    pub async fn execute(&self, plan: PipelinePlan) -> RuntimeResult<ExecutionReport> {
        let _permit = self
            .permits
            .try_acquire()
            .map_err(|_| RuntimeError::AlreadyRunning)?;

        tracing::info!(
            target: TRACING_TARGET,
            stage_count = plan.stage_count(),
            edge_count = plan.edges.len(),
            "Pipeline handed off for execution"
        );

        let execution = self.executor.execute(&plan);
        let report = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, execution)
                .await
                .map_err(|_| RuntimeError::Timeout)??,
            None => execution.await?,
        };

        if report.success {
            tracing::debug!(
                target: TRACING_TARGET,
                "Pipeline execution completed"
            );
        } else {
            tracing::warn!(
                target: TRACING_TARGET,
                message = report.message.as_deref().unwrap_or(""),
                "Pipeline execution failed"
            );
        }
        Ok(report)
    }
}

impl<E> std::fmt::Debug for PipelineHandoff<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineHandoff")
            .field("config", &self.config)
            .field("available_slots", &self.permits.available_permits())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mixdown_graph::GraphStore;
    use mixdown_graph::node::{InputConfig, Node, NodeId, NodeResult, Position};
    use tokio::sync::Notify;
    use uuid::Uuid;

    fn test_node_id(n: u128) -> NodeId {
        NodeId::from_uuid(Uuid::from_u128(n))
    }

    fn single_input_graph() -> GraphStore {
        let mut graph = GraphStore::new();
        graph
            .add_node(Node::with_id(
                test_node_id(1),
                Position::default(),
                InputConfig::new("/a.mov"),
            ))
            .unwrap();
        graph
    }

    fn plan() -> PipelinePlan {
        PipelinePlan::from_graph(&single_input_graph()).unwrap()
    }

    /// Executor that succeeds immediately.
    struct OkExecutor;

    #[async_trait]
    impl PipelineExecutor for OkExecutor {
        async fn execute(&self, _plan: &PipelinePlan) -> RuntimeResult<ExecutionReport> {
            Ok(ExecutionReport::ok())
        }
    }

    /// Executor that reports failure with a backend message.
    struct FailingExecutor;

    #[async_trait]
    impl PipelineExecutor for FailingExecutor {
        async fn execute(&self, _plan: &PipelinePlan) -> RuntimeResult<ExecutionReport> {
            Ok(ExecutionReport::failed("ffmpeg exited with 1"))
        }
    }

    /// Executor that parks until released, signalling when it has started.
    struct GatedExecutor {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl PipelineExecutor for GatedExecutor {
        async fn execute(&self, _plan: &PipelinePlan) -> RuntimeResult<ExecutionReport> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(ExecutionReport::ok())
        }
    }

    /// Executor that never completes.
    struct StuckExecutor;

    #[async_trait]
    impl PipelineExecutor for StuckExecutor {
        async fn execute(&self, _plan: &PipelinePlan) -> RuntimeResult<ExecutionReport> {
            std::future::pending::<()>().await;
            Ok(ExecutionReport::ok())
        }
    }

    #[tokio::test]
    async fn test_successful_execution() {
        let handoff = PipelineHandoff::new(OkExecutor);
        let report = handoff.execute(plan()).await.unwrap();
        assert!(report.success);
        assert_eq!(handoff.available_slots(), 1);
    }

    #[tokio::test]
    async fn test_failure_report_surfaced_verbatim() {
        let handoff = PipelineHandoff::new(FailingExecutor);
        let report = handoff.execute(plan()).await.unwrap();
        assert!(!report.success);
        assert_eq!(report.message.as_deref(), Some("ffmpeg exited with 1"));
    }

    #[tokio::test]
    async fn test_second_concurrent_run_is_rejected() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let handoff = Arc::new(PipelineHandoff::new(GatedExecutor {
            started: started.clone(),
            release: release.clone(),
        }));

        let first = {
            let handoff = handoff.clone();
            tokio::spawn(async move { handoff.execute(plan()).await })
        };
        started.notified().await;

        let second = handoff.execute(plan()).await;
        assert!(matches!(second, Err(RuntimeError::AlreadyRunning)));
        assert_eq!(handoff.available_slots(), 0);

        release.notify_one();
        let report = first.await.unwrap().unwrap();
        assert!(report.success);

        // The slot frees up once the first run finishes.
        assert_eq!(handoff.available_slots(), 1);
        assert!(handoff.execute(plan()).await.is_ok());
    }

    #[tokio::test]
    async fn test_timeout_is_surfaced() {
        let config = HandoffConfigBuilder::default()
            .timeout(Some(Duration::from_millis(10)))
            .build()
            .unwrap();
        let handoff = PipelineHandoff::with_config(StuckExecutor, config);

        let result = handoff.execute(plan()).await;
        assert!(matches!(result, Err(RuntimeError::Timeout)));
    }

    #[tokio::test]
    async fn test_result_write_back_races_deletion() {
        // The graph stays mutable during a run; a result arriving for a
        // deleted node is dropped.
        let mut graph = single_input_graph();
        let handoff = PipelineHandoff::new(OkExecutor);
        let plan = PipelinePlan::from_graph(&graph).unwrap();
        handoff.execute(plan).await.unwrap();

        graph.remove_node(test_node_id(1));
        let applied = graph.apply_node_result(
            test_node_id(1),
            NodeResult::Converted {
                output_path: "/tmp/out.mp4".into(),
            },
        );
        assert!(!applied);
    }

    #[test]
    fn test_config_builder_rejects_zero_slots() {
        let result = HandoffConfigBuilder::default()
            .max_concurrent_runs(0usize)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_defaults_to_single_flight() {
        let config = HandoffConfig::default();
        assert_eq!(config.max_concurrent_runs, 1);
        assert!(config.timeout.is_none());
    }
}
