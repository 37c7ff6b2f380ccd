//! Graph error types.

use thiserror::Error;

use crate::edge::EdgeId;
use crate::node::NodeId;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Structural errors raised at the graph mutation boundary.
///
/// Every variant means the operation was aborted and the store is unchanged;
/// structural invariants are never left to corrupt the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node with this id is already present.
    #[error("node {0} already exists in the graph")]
    DuplicateNodeId(NodeId),

    /// An edge with this id is already present.
    #[error("edge {0} already exists in the graph")]
    DuplicateEdgeId(EdgeId),

    /// An edge endpoint references a node that does not exist.
    #[error("edge references non-existent node: {0}")]
    MissingNode(NodeId),
}
