//! Serializable graph documents.

use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::Node;

/// The JSON-friendly twin of a [`GraphStore`](crate::GraphStore).
///
/// A document is a *template*: sanitized on capture, passthrough on load.
/// Selection flags never serialize, so they cannot leak into storage even if
/// a document is built by hand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Nodes in insertion order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in insertion order.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the document holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strips transient run state from every node and drops selection.
    ///
    /// This is the single sanitation rule shared by
    /// [`GraphStore::to_document`](crate::GraphStore::to_document) and the
    /// workflow catalog's save path. Idempotent: sanitizing a sanitized
    /// document changes nothing.
    pub fn sanitize(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
            node.reset_transient();
        }
        for edge in &mut self.edges {
            edge.selected = false;
        }
    }
}
