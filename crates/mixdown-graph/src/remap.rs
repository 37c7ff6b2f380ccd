//! Identifier remapping for pasted subgraphs.

use std::collections::HashMap;

use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};

/// Positional offset applied to remapped nodes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    /// Horizontal shift.
    pub dx: f64,
    /// Vertical shift.
    pub dy: f64,
}

impl Offset {
    /// Creates an offset.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Result of remapping a node/edge subset.
#[derive(Debug, Clone)]
pub struct Remapped {
    /// Remapped nodes with fresh ids, translated and selected.
    pub nodes: Vec<Node>,
    /// Remapped internal edges with fresh ids, rewritten endpoints.
    pub edges: Vec<Edge>,
    /// Translation table from old node ids to their replacements.
    pub node_ids: HashMap<NodeId, NodeId>,
}

/// Re-identifies a subgraph so it can be materialized next to the original.
///
/// The translation table is built over *all* nodes before any edge is
/// rewritten. Every output node gets a fresh id, its position translated by
/// `offset`, and `selected = true` so the caller can make the pasted subset
/// exactly the new selection. An edge whose endpoint is missing from the
/// table pointed outside the subset and is dropped; "internal edges only" is
/// structural, not a separate filter.
///
/// Transient run state is preserved here; resetting it is the paste path's
/// decision, not the remapper's.
pub fn remap(nodes: &[Node], edges: &[Edge], offset: Offset) -> Remapped {
    let node_ids: HashMap<NodeId, NodeId> = nodes
        .iter()
        .map(|node| (node.id, NodeId::new()))
        .collect();

    let nodes = nodes
        .iter()
        .map(|node| {
            let mut remapped = node.clone();
            remapped.id = node_ids[&node.id];
            remapped.position = node.position.translated(offset.dx, offset.dy);
            remapped.selected = true;
            remapped
        })
        .collect();

    let edges = edges
        .iter()
        .filter_map(|edge| {
            let source = *node_ids.get(&edge.source)?;
            let target = *node_ids.get(&edge.target)?;
            let mut remapped = edge.clone();
            remapped.id = EdgeId::new();
            remapped.source = source;
            remapped.target = target;
            remapped.selected = true;
            Some(remapped)
        })
        .collect();

    Remapped {
        nodes,
        edges,
        node_ids,
    }
}
