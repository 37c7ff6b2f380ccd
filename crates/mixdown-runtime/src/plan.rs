//! Pipeline plan construction.

use std::collections::HashMap;

use mixdown_graph::GraphStore;
use mixdown_graph::node::{Node, NodeId};
use mixdown_graph::Edge;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use thiserror::Error;

/// Structural problems that prevent a graph from being executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The graph has no nodes.
    #[error("pipeline is empty")]
    EmptyGraph,

    /// No input stage to read media from.
    #[error("pipeline has no input stage")]
    NoInputStage,

    /// The graph contains a cycle.
    #[error("pipeline contains a cycle")]
    Cycle,
}

/// A validated, ordered snapshot of the graph, ready to hand off.
///
/// The plan owns clones of the nodes and edges: once built, the live graph
/// may keep changing without affecting an in-flight execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelinePlan {
    /// Nodes at the time the plan was built.
    pub nodes: Vec<Node>,
    /// Edges at the time the plan was built.
    pub edges: Vec<Edge>,
    /// Node ids in topological order.
    pub order: Vec<NodeId>,
}

impl PipelinePlan {
    /// Builds a plan from the current graph.
    ///
    /// Validates that the graph is non-empty, has at least one input stage,
    /// and is acyclic. Converters, analyzers and previews are all legitimate
    /// terminal stages, so nothing is required on the output side.
    pub fn from_graph(graph: &GraphStore) -> Result<Self, PlanError> {
        if graph.is_empty() {
            return Err(PlanError::EmptyGraph);
        }
        if !graph.nodes().iter().any(|node| node.config.is_input()) {
            return Err(PlanError::NoInputStage);
        }

        let mut digraph = DiGraph::<NodeId, ()>::new();
        let mut indices = HashMap::<NodeId, NodeIndex>::new();
        for node in graph.nodes() {
            let index = digraph.add_node(node.id);
            indices.insert(node.id, index);
        }
        for edge in graph.edges() {
            // Both endpoints exist; the store's referential integrity
            // guarantees it.
            if let (Some(source), Some(target)) =
                (indices.get(&edge.source), indices.get(&edge.target))
            {
                digraph.add_edge(*source, *target, ());
            }
        }

        let order = toposort(&digraph, None)
            .map_err(|_| PlanError::Cycle)?
            .into_iter()
            .map(|index| digraph[index])
            .collect();

        Ok(Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            order,
        })
    }

    /// Returns the number of stages in the plan.
    pub fn stage_count(&self) -> usize {
        self.nodes.len()
    }
}
