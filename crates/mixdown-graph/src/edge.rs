//! Edge types for connecting nodes in a pipeline graph.

use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::node::NodeId;

/// Unique identifier for an edge in a pipeline graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct EdgeId(Uuid);

impl EdgeId {
    /// Creates a new random edge ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an edge ID from an existing UUID.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for EdgeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A directed, port-qualified connection between two nodes.
///
/// Ports name which handle of a multi-port node the edge attaches to; port
/// compatibility is validated by the canvas layer before an edge reaches the
/// store. `selected` is editing state and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// Source node ID.
    pub source: NodeId,
    /// Target node ID.
    pub target: NodeId,
    /// Optional port name on the source node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    /// Optional port name on the target node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<String>,
    /// Whether the edge is part of the current selection. Never persisted.
    #[serde(skip)]
    pub selected: bool,
}

impl Edge {
    /// Creates a new edge with a fresh id between two nodes.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
            source_port: None,
            target_port: None,
            selected: false,
        }
    }

    /// Creates an edge with port specifications.
    pub fn with_ports(
        source: NodeId,
        source_port: impl Into<String>,
        target: NodeId,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
            source_port: Some(source_port.into()),
            target_port: Some(target_port.into()),
            selected: false,
        }
    }

    /// Sets the source port.
    pub fn source_port(mut self, port: impl Into<String>) -> Self {
        self.source_port = Some(port.into());
        self
    }

    /// Sets the target port.
    pub fn target_port(mut self, port: impl Into<String>) -> Self {
        self.target_port = Some(port.into());
        self
    }

    /// Returns whether this edge has the given node as an endpoint.
    ///
    /// This predicate is the cascade rule: every path that removes nodes
    /// removes the edges for which `touches` holds, so node removal can
    /// never leave an orphan edge behind.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}
