//! Circuit graph snapshot.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::edge::{Edge, Handle};
use crate::error::IrResult;
use crate::gate::{SingleQubitOp, TwoQubitOp};
use crate::node::{Node, NodeId, Position, QubitValue};

/// One snapshot of the editor's nodes and wires.
///
/// The compiler only ever borrows a snapshot, so a graph handed to it is
/// frozen for the duration of the call. Neither collection is assumed to be
/// in any particular order.
///
/// # Example
///
/// ```rust
/// use qwire_ir::{CircuitGraph, QubitValue, SingleQubitOp};
///
/// let mut graph = CircuitGraph::new();
/// let q = graph.qubit("q0", QubitValue::Zero, 100.0);
/// let h = graph.single_gate("h", SingleQubitOp::Hadamard, 100.0);
/// let m = graph.measurement("m0", 100.0);
/// graph.connect(&q, &h);
/// graph.connect(&h, &m);
///
/// assert_eq!(graph.num_qubit_sources(), 1);
/// assert_eq!(graph.edges().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl CircuitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from existing node and edge collections.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse the editor's JSON export.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the graph in the editor's JSON export shape.
    pub fn to_json_pretty(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All nodes.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All wires.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Decompose into node and edge collections.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// Find a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Iterate over qubit sources in collection order.
    pub fn qubit_sources(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind.is_qubit_source())
    }

    /// Qubit sources in logical order: `y` ascending, ties broken by id.
    ///
    /// The position in the returned vector is the logical qubit index.
    pub fn ordered_qubit_sources(&self) -> Vec<&Node> {
        let mut sources: Vec<&Node> = self.qubit_sources().collect();
        sources.sort_by(|a, b| logical_order(a, b));
        sources
    }

    /// Number of qubit sources.
    pub fn num_qubit_sources(&self) -> usize {
        self.qubit_sources().count()
    }

    /// Number of measurement nodes.
    pub fn num_measurements(&self) -> usize {
        self.nodes.iter().filter(|n| n.kind.is_measurement()).count()
    }

    /// Add a node, returning its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Add a wire.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Add a qubit source at canvas height `y`.
    pub fn qubit(&mut self, id: impl Into<NodeId>, value: QubitValue, y: f64) -> NodeId {
        self.add_node(Node::qubit(id, value, Position::new(0.0, y)))
    }

    /// Add a single-qubit gate at canvas height `y`.
    pub fn single_gate(&mut self, id: impl Into<NodeId>, operation: SingleQubitOp, y: f64) -> NodeId {
        self.add_node(Node::single_gate(id, operation, Position::new(0.0, y)))
    }

    /// Add a two-qubit gate at canvas height `y`.
    pub fn two_gate(&mut self, id: impl Into<NodeId>, operation: TwoQubitOp, y: f64) -> NodeId {
        self.add_node(Node::two_gate(id, operation, Position::new(0.0, y)))
    }

    /// Add a measurement at canvas height `y`.
    pub fn measurement(&mut self, id: impl Into<NodeId>, y: f64) -> NodeId {
        self.add_node(Node::measurement(id, Position::new(0.0, y)))
    }

    /// Wire two single-port handles together.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) {
        self.add_edge(Edge::new(source.clone(), target.clone()));
    }

    /// Wire with explicit handles on either end.
    pub fn connect_handles(
        &mut self,
        source: &NodeId,
        source_handle: Option<Handle>,
        target: &NodeId,
        target_handle: Option<Handle>,
    ) {
        self.add_edge(Edge {
            id: None,
            source: source.clone(),
            target: target.clone(),
            source_handle,
            target_handle,
        });
    }
}

/// Total order on qubit sources: vertical position, then id.
fn logical_order(a: &Node, b: &Node) -> Ordering {
    a.position
        .y
        .total_cmp(&b.position.y)
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_ordered_sources_by_height() {
        let mut graph = CircuitGraph::new();
        graph.qubit("low", QubitValue::One, 180.0);
        graph.qubit("high", QubitValue::Zero, 100.0);
        graph.measurement("m", 0.0);

        let order: Vec<_> = graph
            .ordered_qubit_sources()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(order, ["high", "low"]);
    }

    #[test]
    fn test_ordered_sources_tie_broken_by_id() {
        let mut graph = CircuitGraph::new();
        graph.qubit("b", QubitValue::Zero, 50.0);
        graph.qubit("a", QubitValue::Zero, 50.0);
        graph.qubit("c", QubitValue::Zero, 10.0);

        let order: Vec<_> = graph
            .ordered_qubit_sources()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn test_counts() {
        let mut graph = CircuitGraph::new();
        graph.qubit("q0", QubitValue::Zero, 0.0);
        graph.measurement("m0", 0.0);
        graph.measurement("m1", 0.0);
        assert_eq!(graph.num_qubit_sources(), 1);
        assert_eq!(graph.num_measurements(), 2);
        assert!(graph.node("m1").is_some());
        assert!(graph.node("nope").is_none());
    }

    #[test]
    fn test_parse_editor_export() {
        let json = r#"{
            "nodes": [
                {"id": "q0", "type": "qubitNode", "position": {"x": 0, "y": 100}, "data": {"value": 0}},
                {"id": "cx", "type": "twoQubitGateNode", "position": {"x": 150, "y": 120}, "data": {"operation": "cnot"}},
                {"id": "m0", "type": "measurementNode", "position": {"x": 300, "y": 100}, "data": {}}
            ],
            "edges": [
                {"id": "e1", "source": "q0", "target": "cx", "targetHandle": "input1"},
                {"id": "e2", "source": "cx", "target": "m0", "sourceHandle": "output1"}
            ]
        }"#;
        let graph = CircuitGraph::from_json(json).unwrap();
        assert_eq!(graph.nodes().len(), 3);
        assert_eq!(graph.edges()[0].target_handle, Some(Handle::Input1));
        assert_eq!(
            graph.node("cx").unwrap().kind,
            NodeKind::TwoQubitGate {
                operation: TwoQubitOp::Cnot
            }
        );
    }

    #[test]
    fn test_json_export_reloads() {
        let mut graph = CircuitGraph::new();
        let q = graph.qubit("q0", QubitValue::One, 100.0);
        let m = graph.measurement("m0", 100.0);
        graph.connect(&q, &m);

        let reloaded = CircuitGraph::from_json(&graph.to_json_pretty().unwrap()).unwrap();
        assert_eq!(reloaded, graph);
    }

    #[test]
    fn test_empty_document() {
        let graph = CircuitGraph::from_json("{}").unwrap();
        assert!(graph.nodes().is_empty());
        assert!(graph.edges().is_empty());
    }
}
