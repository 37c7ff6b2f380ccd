//! The authoritative graph store.

use crate::document::GraphDocument;
use crate::edge::{Edge, EdgeId};
use crate::error::{GraphError, GraphResult};
use crate::node::{Node, NodeId, NodeResult};

/// The authoritative pipeline graph: ordered nodes and edges plus the
/// current selection.
///
/// All mutation goes through this type so the structural invariants hold at
/// every return: node and edge ids are unique, every edge endpoint references
/// an existing node, and removing a node cascades to every edge touching it.
/// The selection is stored as flags on nodes and edges and read as a live
/// filter, so it cannot desynchronize from existence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphStore {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns a reference to a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns a reference to an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Returns whether a node exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Appends a node.
    ///
    /// Fails with [`GraphError::DuplicateNodeId`] if the id is already
    /// present; the store is unchanged on error.
    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.contains_node(node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a node and every edge touching it.
    ///
    /// Returns the removed node, or `None` if the id is unknown. No orphan
    /// edge exists after this call returns.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        let node = self.nodes.remove(index);
        self.edges.retain(|edge| !edge.touches(id));
        Some(node)
    }

    /// Removes an edge.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| edge.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Inserts a fully-formed edge.
    ///
    /// Fails if the edge id is already present or an endpoint does not
    /// exist; the store is unchanged on error. Port compatibility is the
    /// canvas layer's concern and is not checked here.
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if self.edges.iter().any(|existing| existing.id == edge.id) {
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }
        if !self.contains_node(edge.source) {
            return Err(GraphError::MissingNode(edge.source));
        }
        if !self.contains_node(edge.target) {
            return Err(GraphError::MissingNode(edge.target));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Connects two nodes with a fresh, unqualified edge.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> GraphResult<EdgeId> {
        let edge = Edge::new(source, target);
        let id = edge.id;
        self.insert_edge(edge)?;
        Ok(id)
    }

    /// Connects two node ports with a fresh edge.
    pub fn connect_ports(
        &mut self,
        source: NodeId,
        source_port: impl Into<String>,
        target: NodeId,
        target_port: impl Into<String>,
    ) -> GraphResult<EdgeId> {
        let edge = Edge::with_ports(source, source_port, target, target_port);
        let id = edge.id;
        self.insert_edge(edge)?;
        Ok(id)
    }

    /// Mutates a node in place.
    ///
    /// Returns `false` without running the closure when the id is unknown:
    /// configuration edits may race a deletion, and losing that race is a
    /// tolerated no-op rather than an error.
    pub fn update_node(&mut self, id: NodeId, f: impl FnOnce(&mut Node)) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                f(node);
                true
            }
            None => false,
        }
    }

    /// Applies a backend result to a node by id.
    ///
    /// Returns `false` when the node no longer exists; results arriving
    /// after a deletion are dropped.
    pub fn apply_node_result(&mut self, id: NodeId, result: NodeResult) -> bool {
        self.update_node(id, |node| node.apply_result(result))
    }

    /// Returns the currently selected nodes, as a live filter.
    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.selected)
    }

    /// Returns the currently selected edges, as a live filter.
    pub fn selected_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| edge.selected)
    }

    /// Returns whether anything is selected.
    pub fn has_selection(&self) -> bool {
        self.selected_nodes().next().is_some() || self.selected_edges().next().is_some()
    }

    /// Sets a node's selection flag. Returns `false` for unknown ids.
    pub fn set_node_selected(&mut self, id: NodeId, selected: bool) -> bool {
        self.update_node(id, |node| node.selected = selected)
    }

    /// Sets an edge's selection flag. Returns `false` for unknown ids.
    pub fn set_edge_selected(&mut self, id: EdgeId, selected: bool) -> bool {
        match self.edges.iter_mut().find(|edge| edge.id == id) {
            Some(edge) => {
                edge.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Selects every node and edge.
    pub fn select_all(&mut self) {
        for node in &mut self.nodes {
            node.selected = true;
        }
        for edge in &mut self.edges {
            edge.selected = true;
        }
    }

    /// Deselects every node and edge.
    pub fn clear_selection(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
        for edge in &mut self.edges {
            edge.selected = false;
        }
    }

    /// Captures a sanitized document of the current graph.
    ///
    /// See [`GraphDocument::sanitize`] for what is stripped.
    pub fn to_document(&self) -> GraphDocument {
        let mut document = GraphDocument {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        };
        document.sanitize();
        document
    }

    /// Builds a graph from a document, validating structural invariants.
    ///
    /// Loading is passthrough apart from validation: documents are sanitized
    /// by construction, so nothing is stripped here.
    pub fn from_document(document: GraphDocument) -> GraphResult<Self> {
        let mut graph = Self::new();
        for node in document.nodes {
            graph.add_node(node)?;
        }
        for edge in document.edges {
            graph.insert_edge(edge)?;
        }
        Ok(graph)
    }

    /// Replaces the graph contents with a document.
    ///
    /// Validation happens against a scratch graph first, so a malformed
    /// document leaves the store untouched.
    pub fn load_document(&mut self, document: GraphDocument) -> GraphResult<()> {
        *self = Self::from_document(document)?;
        Ok(())
    }

    /// Appends already-remapped nodes and edges.
    ///
    /// Callers guarantee the ids are fresh (remapper output); invariants are
    /// preserved because remapped edges only reference remapped nodes.
    pub(crate) fn extend_remapped(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes.extend(nodes);
        self.edges.extend(edges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ConvertConfig, InputConfig, Position};
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

    fn convert_node(n: u128) -> Node {
        Node::with_id(
            test_node_id(n),
            Position::new(n as f64 * 10.0, 50.0),
            ConvertConfig::default(),
        )
    }

    #[test]
    fn test_add_node_rejects_duplicate_id() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();

        let result = graph.add_node(input_node(1));
        assert_eq!(result, Err(GraphError::DuplicateNodeId(test_node_id(1))));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        // Nodes {1,2,3} with edges {1->2, 2->3}; removing 2 leaves {1,3}
        // and no edges.
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();
        graph.add_node(convert_node(2)).unwrap();
        graph.add_node(convert_node(3)).unwrap();
        graph.connect(test_node_id(1), test_node_id(2)).unwrap();
        graph.connect(test_node_id(2), test_node_id(3)).unwrap();

        let removed = graph.remove_node(test_node_id(2));
        assert!(removed.is_some());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.contains_node(test_node_id(1)));
        assert!(graph.contains_node(test_node_id(3)));
    }

    #[test]
    fn test_remove_unknown_node_is_noop() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();
        assert!(graph.remove_node(test_node_id(9)).is_none());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_connect_requires_existing_endpoints() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();

        let result = graph.connect(test_node_id(1), test_node_id(9));
        assert_eq!(result, Err(GraphError::MissingNode(test_node_id(9))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_connect_ports() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();
        graph.add_node(convert_node(2)).unwrap();

        let id = graph
            .connect_ports(test_node_id(1), "out", test_node_id(2), "source")
            .unwrap();
        let edge = graph.edge(id).unwrap();
        assert_eq!(edge.source_port.as_deref(), Some("out"));
        assert_eq!(edge.target_port.as_deref(), Some("source"));
    }

    #[test]
    fn test_update_node_racing_deletion_is_noop() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();
        graph.remove_node(test_node_id(1));

        let applied = graph.update_node(test_node_id(1), |node| {
            node.position = Position::new(1.0, 1.0);
        });
        assert!(!applied);
    }

    #[test]
    fn test_selection_is_live_filter() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();
        graph.add_node(convert_node(2)).unwrap();
        graph.set_node_selected(test_node_id(1), true);
        graph.set_node_selected(test_node_id(2), true);
        assert_eq!(graph.selected_nodes().count(), 2);

        // Deleting a selected node must shrink the selection with it.
        graph.remove_node(test_node_id(1));
        assert_eq!(graph.selected_nodes().count(), 1);
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut graph = GraphStore::new();
        graph.add_node(input_node(1)).unwrap();
        graph.add_node(convert_node(2)).unwrap();
        graph.connect(test_node_id(1), test_node_id(2)).unwrap();

        graph.select_all();
        assert_eq!(graph.selected_nodes().count(), 2);
        assert_eq!(graph.selected_edges().count(), 1);
        assert!(graph.has_selection());

        graph.clear_selection();
        assert!(!graph.has_selection());
    }

    #[test]
    fn test_uniqueness_holds_across_add_sequences() {
        let mut graph = GraphStore::new();
        for n in 1..=20 {
            graph.add_node(input_node(n)).unwrap();
        }
        for n in 1..=20 {
            assert!(graph.add_node(input_node(n)).is_err());
        }

        let mut ids: Vec<_> = graph.nodes().iter().map(|node| node.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), graph.node_count());
    }
}
