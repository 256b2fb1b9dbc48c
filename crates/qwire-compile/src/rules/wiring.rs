//! Wire endpoint and port checks.

use qwire_ir::{Handle, NodeId, NodeKind};

use crate::adjacency::Adjacency;
use crate::error::StructuralError;
use crate::rule::ValidationRule;

/// Node ids are unique and every wire references existing nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireEndpoints;

impl ValidationRule for WireEndpoints {
    fn name(&self) -> &str {
        "wire_endpoints"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        if let Some(id) = adjacency.duplicate_ids().iter().min() {
            return Err(StructuralError::DuplicateNodeId { id: (*id).clone() });
        }

        let first = adjacency
            .dangling()
            .iter()
            .min_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        if let Some(edge) = first {
            let missing: &NodeId = if adjacency.index_of(edge.source.as_str()).is_none() {
                &edge.source
            } else {
                &edge.target
            };
            return Err(StructuralError::DanglingWire {
                from: edge.source.clone(),
                target: edge.target.clone(),
                missing: missing.clone(),
            });
        }
        Ok(())
    }
}

/// Qubit sources have no incoming wires and measurements no outgoing ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalDirection;

impl ValidationRule for TerminalDirection {
    fn name(&self) -> &str {
        "terminal_direction"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for ix in adjacency.nodes_by_id() {
            let node = adjacency.node(ix);
            if node.kind.is_qubit_source() && adjacency.in_degree(ix) > 0 {
                return Err(StructuralError::WireIntoQubit {
                    id: node.id.clone(),
                });
            }
            if node.kind.is_measurement() && adjacency.out_degree(ix) > 0 {
                return Err(StructuralError::WireFromMeasurement {
                    id: node.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Each port of a two-qubit gate carries exactly one wire.
///
/// Ports are checked in the order `input1`, `input2`, `output1`, `output2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleAssignment;

impl ValidationRule for HandleAssignment {
    fn name(&self) -> &str {
        "handle_assignment"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for ix in adjacency.nodes_by_id() {
            let node = adjacency.node(ix);
            let NodeKind::TwoQubitGate { operation } = node.kind else {
                continue;
            };

            let mut counts = [0usize; 4];
            for wire in adjacency.incoming(ix) {
                match wire.target_handle {
                    Some(Handle::Input1) => counts[0] += 1,
                    Some(Handle::Input2) => counts[1] += 1,
                    _ => {}
                }
            }
            for out in adjacency.outgoing(ix) {
                match out.wire.source_handle {
                    Some(Handle::Output1) => counts[2] += 1,
                    Some(Handle::Output2) => counts[3] += 1,
                    _ => {}
                }
            }

            let ports = [Handle::Input1, Handle::Input2, Handle::Output1, Handle::Output2];
            for (handle, found) in ports.into_iter().zip(counts) {
                if found != 1 {
                    return Err(StructuralError::HandleMismatch {
                        id: node.id.clone(),
                        operation: operation.name(),
                        handle: handle.name(),
                        found,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwire_ir::{CircuitGraph, Node, Position, QubitValue, TwoQubitOp};

    #[test]
    fn test_duplicate_id() {
        let mut graph = CircuitGraph::new();
        graph.qubit("q0", QubitValue::Zero, 0.0);
        graph.add_node(Node::measurement("q0", Position::default()));
        let adj = Adjacency::build(&graph);
        assert_eq!(
            WireEndpoints.check(&adj),
            Err(StructuralError::DuplicateNodeId {
                id: NodeId::new("q0")
            })
        );
    }

    #[test]
    fn test_dangling_target() {
        let mut graph = CircuitGraph::new();
        let q = graph.qubit("q0", QubitValue::Zero, 0.0);
        graph.connect(&q, &NodeId::new("deleted"));
        let adj = Adjacency::build(&graph);
        let err = WireEndpoints.check(&adj).unwrap_err();
        assert_eq!(
            err.to_string(),
            "wire from 'q0' to 'deleted' references missing node 'deleted'"
        );
    }

    #[test]
    fn test_dangling_source() {
        let mut graph = CircuitGraph::new();
        let m = graph.measurement("m0", 0.0);
        graph.connect(&NodeId::new("gone"), &m);
        let adj = Adjacency::build(&graph);
        assert_eq!(
            WireEndpoints.check(&adj),
            Err(StructuralError::DanglingWire {
                from: NodeId::new("gone"),
                target: m,
                missing: NodeId::new("gone"),
            })
        );
    }

    #[test]
    fn test_wire_into_qubit() {
        let mut graph = CircuitGraph::new();
        let a = graph.qubit("a", QubitValue::Zero, 0.0);
        let b = graph.qubit("b", QubitValue::Zero, 1.0);
        graph.connect(&a, &b);
        let adj = Adjacency::build(&graph);
        assert_eq!(
            TerminalDirection.check(&adj),
            Err(StructuralError::WireIntoQubit { id: b })
        );
    }

    #[test]
    fn test_wire_from_measurement() {
        let mut graph = CircuitGraph::new();
        let m0 = graph.measurement("m0", 0.0);
        let m1 = graph.measurement("m1", 0.0);
        graph.connect(&m0, &m1);
        let adj = Adjacency::build(&graph);
        assert_eq!(
            TerminalDirection.check(&adj),
            Err(StructuralError::WireFromMeasurement { id: m0 })
        );
    }

    #[test]
    fn test_same_input_handle_twice() {
        let mut graph = CircuitGraph::new();
        let q0 = graph.qubit("q0", QubitValue::Zero, 0.0);
        let q1 = graph.qubit("q1", QubitValue::Zero, 1.0);
        let cx = graph.two_gate("cx", TwoQubitOp::Cnot, 0.0);
        let m0 = graph.measurement("m0", 0.0);
        let m1 = graph.measurement("m1", 1.0);
        graph.connect_handles(&q0, None, &cx, Some(Handle::Input1));
        graph.connect_handles(&q1, None, &cx, Some(Handle::Input1));
        graph.connect_handles(&cx, Some(Handle::Output1), &m0, None);
        graph.connect_handles(&cx, Some(Handle::Output2), &m1, None);
        let adj = Adjacency::build(&graph);
        let err = HandleAssignment.check(&adj).unwrap_err();
        assert_eq!(
            err.to_string(),
            "two qubit gate (cnot) must use handle input1 exactly once, found 2"
        );
    }

    #[test]
    fn test_unlabelled_output() {
        let mut graph = CircuitGraph::new();
        let q0 = graph.qubit("q0", QubitValue::Zero, 0.0);
        let q1 = graph.qubit("q1", QubitValue::Zero, 1.0);
        let sw = graph.two_gate("sw", TwoQubitOp::Swap, 0.0);
        let m0 = graph.measurement("m0", 0.0);
        let m1 = graph.measurement("m1", 1.0);
        graph.connect_handles(&q0, None, &sw, Some(Handle::Input1));
        graph.connect_handles(&q1, None, &sw, Some(Handle::Input2));
        graph.connect_handles(&sw, None, &m0, None);
        graph.connect_handles(&sw, Some(Handle::Output2), &m1, None);
        let adj = Adjacency::build(&graph);
        assert!(matches!(
            HandleAssignment.check(&adj),
            Err(StructuralError::HandleMismatch { handle: "output1", found: 0, .. })
        ));
    }
}
