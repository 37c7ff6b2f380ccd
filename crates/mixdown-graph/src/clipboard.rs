//! Selection-scoped clipboard.

use std::collections::HashSet;

use jiff::Timestamp;

use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};
use crate::remap::{Offset, remap};
use crate::store::GraphStore;

const TRACING_TARGET: &str = "mixdown_graph::clipboard";

/// Offset applied when pasting, so copies do not sit exactly on the
/// originals.
pub const PASTE_OFFSET: Offset = Offset::new(50.0, 50.0);

/// Offset applied when duplicating in place.
pub const DUPLICATE_OFFSET: Offset = Offset::new(100.0, 100.0);

/// One captured copy of a node/edge subset.
///
/// Immutable once captured; replaced wholesale by the next copy. Never
/// persisted across process restarts.
#[derive(Debug, Clone)]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    captured_at: Timestamp,
}

impl Snapshot {
    /// Returns the captured nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the captured internal edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns when the snapshot was captured.
    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }
}

/// Outcome of a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// A snapshot was captured.
    Copied {
        /// Number of nodes captured.
        nodes: usize,
        /// Number of internal edges captured.
        edges: usize,
    },
    /// The selection was empty; nothing happened.
    NothingSelected,
}

/// Identifiers of a freshly pasted subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PastedSet {
    /// Ids of the pasted nodes.
    pub nodes: Vec<NodeId>,
    /// Ids of the pasted edges.
    pub edges: Vec<EdgeId>,
}

/// Outcome of a paste operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The snapshot was materialized into the graph.
    Pasted(PastedSet),
    /// No snapshot is held; nothing happened.
    EmptyClipboard,
}

/// Outcome of a duplicate operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateOutcome {
    /// The selection was copied and materialized.
    Duplicated(PastedSet),
    /// The selection was empty; nothing happened.
    NothingSelected,
}

/// Outcome of deleting the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The selection and its cascade were removed.
    Deleted {
        /// Number of nodes removed.
        nodes: usize,
        /// Number of edges removed.
        edges: usize,
    },
    /// The selection was empty; nothing happened.
    NothingSelected,
}

/// Session-scoped clipboard holding at most one snapshot.
///
/// An owned component: each editor instance constructs its own clipboard, so
/// independent editors (and tests) never share snapshot state.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    snapshot: Option<Snapshot>,
}

impl Clipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a snapshot is currently held.
    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Returns the held snapshot, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Drops the held snapshot.
    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    /// Captures the selected nodes and their induced internal edges.
    ///
    /// The internal-edge set is computed from *all* edges whose endpoints
    /// are both selected, whether or not the edge itself is; an edge leaving
    /// the selection is excluded. Overwrites any previous snapshot. With an
    /// empty node selection nothing is captured and the previous snapshot
    /// survives.
    pub fn copy(&mut self, graph: &GraphStore) -> CopyOutcome {
        let nodes: Vec<Node> = graph.selected_nodes().cloned().collect();
        if nodes.is_empty() {
            return CopyOutcome::NothingSelected;
        }

        let selected_ids: HashSet<NodeId> = nodes.iter().map(|node| node.id).collect();
        let edges: Vec<Edge> = graph
            .edges()
            .iter()
            .filter(|edge| {
                selected_ids.contains(&edge.source) && selected_ids.contains(&edge.target)
            })
            .cloned()
            .collect();

        let outcome = CopyOutcome::Copied {
            nodes: nodes.len(),
            edges: edges.len(),
        };
        tracing::debug!(
            target: TRACING_TARGET,
            node_count = nodes.len(),
            edge_count = edges.len(),
            "Selection copied"
        );

        self.snapshot = Some(Snapshot {
            nodes,
            edges,
            captured_at: Timestamp::now(),
        });
        outcome
    }

    /// Materializes the held snapshot into the graph.
    ///
    /// The snapshot is remapped to fresh ids at the given offset, transient
    /// run state is reset so pasted stages re-enter a not-yet-processed
    /// state, and the pasted subgraph becomes exactly the new selection.
    /// Reports [`PasteOutcome::EmptyClipboard`] when no snapshot is held.
    pub fn paste(&self, graph: &mut GraphStore, offset: Offset) -> PasteOutcome {
        let Some(snapshot) = &self.snapshot else {
            return PasteOutcome::EmptyClipboard;
        };

        let mut remapped = remap(snapshot.nodes(), snapshot.edges(), offset);
        for node in &mut remapped.nodes {
            node.reset_transient();
        }

        let pasted = PastedSet {
            nodes: remapped.nodes.iter().map(|node| node.id).collect(),
            edges: remapped.edges.iter().map(|edge| edge.id).collect(),
        };

        graph.clear_selection();
        graph.extend_remapped(remapped.nodes, remapped.edges);

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = pasted.nodes.len(),
            edge_count = pasted.edges.len(),
            "Snapshot pasted"
        );
        PasteOutcome::Pasted(pasted)
    }

    /// Copies the selection and immediately pastes it at a larger offset.
    ///
    /// A no-op when nothing is selected. The clipboard ends up holding the
    /// duplicated selection, as copy-then-paste implies.
    pub fn duplicate(&mut self, graph: &mut GraphStore) -> DuplicateOutcome {
        if self.copy(graph) == CopyOutcome::NothingSelected {
            return DuplicateOutcome::NothingSelected;
        }
        match self.paste(graph, DUPLICATE_OFFSET) {
            PasteOutcome::Pasted(pasted) => DuplicateOutcome::Duplicated(pasted),
            PasteOutcome::EmptyClipboard => DuplicateOutcome::NothingSelected,
        }
    }
}

/// Deletes the current selection and its cascade.
///
/// The removal set is the selected edges plus every edge touching a selected
/// node, then the selected nodes. The cascade uses the same
/// [`Edge::touches`] predicate as [`GraphStore::remove_node`], so the two
/// paths agree by construction. An edge with exactly one endpoint selected is
/// removed silently.
pub fn delete_selection(graph: &mut GraphStore) -> DeleteOutcome {
    let selected_nodes: Vec<NodeId> = graph.selected_nodes().map(|node| node.id).collect();
    let selected_node_set: HashSet<NodeId> = selected_nodes.iter().copied().collect();

    let doomed_edges: Vec<EdgeId> = graph
        .edges()
        .iter()
        .filter(|edge| {
            edge.selected || selected_node_set.iter().any(|id| edge.touches(*id))
        })
        .map(|edge| edge.id)
        .collect();

    if selected_nodes.is_empty() && doomed_edges.is_empty() {
        return DeleteOutcome::NothingSelected;
    }

    for id in &doomed_edges {
        graph.remove_edge(*id);
    }
    for id in &selected_nodes {
        graph.remove_node(*id);
    }

    tracing::debug!(
        target: TRACING_TARGET,
        node_count = selected_nodes.len(),
        edge_count = doomed_edges.len(),
        "Selection deleted"
    );
    DeleteOutcome::Deleted {
        nodes: selected_nodes.len(),
        edges: doomed_edges.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AnalyzeConfig, InputConfig, NodeConfig, Position};
    use uuid::Uuid;

    fn test_node_id(n: u128) -> NodeId {
        NodeId::from_uuid(Uuid::from_u128(n))
    }

    fn input_node(n: u128) -> Node {
        Node::with_id(
            test_node_id(n),
            Position::new(n as f64 * 10.0, 0.0),
            InputConfig::new(format!("/media/{n}.mov")),
        )
    }

    /// Store with nodes {1,2,3} and edges {1->2, 2->3}.
    fn chain_graph() -> GraphStore {
        let mut graph = GraphStore::new();
        for n in 1..=3 {
            graph.add_node(input_node(n)).unwrap();
        }
        graph.connect(test_node_id(1), test_node_id(2)).unwrap();
        graph.connect(test_node_id(2), test_node_id(3)).unwrap();
        graph
    }

    #[test]
    fn test_copy_with_empty_selection() {
        let graph = chain_graph();
        let mut clipboard = Clipboard::new();

        assert_eq!(clipboard.copy(&graph), CopyOutcome::NothingSelected);
        assert!(!clipboard.has_data());
    }

    #[test]
    fn test_copy_captures_induced_internal_edges() {
        // Select {1,2}: only 1->2 is internal; 2->3 leaves the selection.
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(1), true);
        graph.set_node_selected(test_node_id(2), true);

        let mut clipboard = Clipboard::new();
        let outcome = clipboard.copy(&graph);
        assert_eq!(outcome, CopyOutcome::Copied { nodes: 2, edges: 1 });

        let snapshot = clipboard.snapshot().unwrap();
        assert_eq!(snapshot.edges()[0].source, test_node_id(1));
        assert_eq!(snapshot.edges()[0].target, test_node_id(2));
    }

    #[test]
    fn test_paste_with_empty_clipboard() {
        let mut graph = chain_graph();
        let clipboard = Clipboard::new();

        let outcome = clipboard.paste(&mut graph, PASTE_OFFSET);
        assert_eq!(outcome, PasteOutcome::EmptyClipboard);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_copy_paste_round_trip() {
        // Copying {1,2} and pasting once adds exactly 2 nodes and 1 edge,
        // offset by (50,50), with the new edge mirroring 1->2.
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(1), true);
        graph.set_node_selected(test_node_id(2), true);

        let mut clipboard = Clipboard::new();
        clipboard.copy(&graph);
        let PasteOutcome::Pasted(pasted) = clipboard.paste(&mut graph, PASTE_OFFSET) else {
            panic!("paste failed");
        };

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(pasted.nodes.len(), 2);
        assert_eq!(pasted.edges.len(), 1);

        let first = graph.node(pasted.nodes[0]).unwrap();
        assert_eq!(first.position, Position::new(60.0, 50.0));

        let new_edge = graph.edge(pasted.edges[0]).unwrap();
        assert_eq!(new_edge.source, pasted.nodes[0]);
        assert_eq!(new_edge.target, pasted.nodes[1]);
    }

    #[test]
    fn test_paste_selects_exactly_the_pasted_subgraph() {
        let mut graph = chain_graph();
        graph.select_all();

        let mut clipboard = Clipboard::new();
        clipboard.copy(&graph);
        let PasteOutcome::Pasted(pasted) = clipboard.paste(&mut graph, PASTE_OFFSET) else {
            panic!("paste failed");
        };

        let selected: Vec<NodeId> = graph.selected_nodes().map(|node| node.id).collect();
        assert_eq!(selected, pasted.nodes);
        assert!(graph.selected_edges().all(|edge| pasted.edges.contains(&edge.id)));
        assert_eq!(graph.selected_edges().count(), pasted.edges.len());
    }

    #[test]
    fn test_paste_resets_transient_state() {
        let mut graph = GraphStore::new();
        let mut node = Node::with_id(
            test_node_id(1),
            Position::default(),
            AnalyzeConfig {
                metric: Default::default(),
                score: Some(88.0),
                analyzing: true,
            },
        );
        node.error = Some("stale".into());
        graph.add_node(node).unwrap();
        graph.set_node_selected(test_node_id(1), true);

        let mut clipboard = Clipboard::new();
        clipboard.copy(&graph);
        let PasteOutcome::Pasted(pasted) = clipboard.paste(&mut graph, PASTE_OFFSET) else {
            panic!("paste failed");
        };

        let pasted_node = graph.node(pasted.nodes[0]).unwrap();
        assert_eq!(pasted_node.error, None);
        let NodeConfig::Analyze(analyze) = &pasted_node.config else {
            panic!("kind changed");
        };
        assert_eq!(analyze.score, None);
        assert!(!analyze.analyzing);
    }

    #[test]
    fn test_paste_twice_from_one_snapshot() {
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(1), true);

        let mut clipboard = Clipboard::new();
        clipboard.copy(&graph);
        clipboard.paste(&mut graph, PASTE_OFFSET);
        clipboard.paste(&mut graph, PASTE_OFFSET);

        assert_eq!(graph.node_count(), 5);
        assert!(clipboard.has_data());
    }

    #[test]
    fn test_duplicate_composes_copy_and_paste() {
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(3), true);

        let mut clipboard = Clipboard::new();
        let DuplicateOutcome::Duplicated(pasted) = clipboard.duplicate(&mut graph) else {
            panic!("duplicate failed");
        };

        assert_eq!(graph.node_count(), 4);
        let duplicated = graph.node(pasted.nodes[0]).unwrap();
        assert_eq!(duplicated.position, Position::new(130.0, 100.0));
    }

    #[test]
    fn test_duplicate_with_empty_selection_is_noop() {
        let mut graph = chain_graph();
        let mut clipboard = Clipboard::new();

        let outcome = clipboard.duplicate(&mut graph);
        assert_eq!(outcome, DuplicateOutcome::NothingSelected);
        assert_eq!(graph.node_count(), 3);
        assert!(!clipboard.has_data());
    }

    #[test]
    fn test_delete_cascades_like_remove_node() {
        // Deleting node 2 through the selection path removes both edges
        // even though neither edge is selected.
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(2), true);

        let outcome = delete_selection(&mut graph);
        assert_eq!(outcome, DeleteOutcome::Deleted { nodes: 1, edges: 2 });
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_delete_selected_edge_only() {
        let mut graph = chain_graph();
        let edge_id = graph.edges()[0].id;
        graph.set_edge_selected(edge_id, true);

        let outcome = delete_selection(&mut graph);
        assert_eq!(outcome, DeleteOutcome::Deleted { nodes: 0, edges: 1 });
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_delete_with_empty_selection() {
        let mut graph = chain_graph();
        assert_eq!(delete_selection(&mut graph), DeleteOutcome::NothingSelected);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_clear_drops_snapshot() {
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(1), true);

        let mut clipboard = Clipboard::new();
        clipboard.copy(&graph);
        assert!(clipboard.has_data());

        clipboard.clear();
        assert!(!clipboard.has_data());
    }

    #[test]
    fn test_independent_clipboards() {
        let mut graph = chain_graph();
        graph.set_node_selected(test_node_id(1), true);

        let mut first = Clipboard::new();
        let second = Clipboard::new();
        first.copy(&graph);

        assert!(first.has_data());
        assert!(!second.has_data());
    }
}
