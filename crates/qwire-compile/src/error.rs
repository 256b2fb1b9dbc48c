//! Error types for the compilation crate.

use qwire_ir::NodeId;
use thiserror::Error;

/// A violated circuit well-formedness rule.
///
/// The display strings are the messages shown to the editor's user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StructuralError {
    /// The graph has no qubit sources.
    #[error("no qubits found; add at least one qubit")]
    NoQubits,

    /// Every qubit line needs exactly one measurement.
    #[error("{qubits} qubit(s) but {measurements} measurement(s); each qubit must be measured")]
    MeasurementCountMismatch {
        /// Number of qubit sources.
        qubits: usize,
        /// Number of measurement nodes.
        measurements: usize,
    },

    /// A qubit source does not have exactly one outgoing wire.
    #[error("qubit '{id}' must have exactly 1 output wire, found {found}")]
    QubitOutputs {
        /// The qubit source.
        id: NodeId,
        /// Number of outgoing wires.
        found: usize,
    },

    /// A gate has the wrong number of incoming wires for its arity.
    #[error("{kind} ({operation}) must have exactly {expected} input {}, found {found}", wires(*.expected))]
    GateInputs {
        /// The gate node.
        id: NodeId,
        /// Kind label ("single qubit gate", "two qubit gate").
        kind: &'static str,
        /// Gate operation name.
        operation: &'static str,
        /// Required number of incoming wires.
        expected: usize,
        /// Actual number of incoming wires.
        found: usize,
    },

    /// A gate has the wrong number of outgoing wires for its arity.
    #[error("{kind} ({operation}) must have exactly {expected} output {}, found {found}", wires(*.expected))]
    GateOutputs {
        /// The gate node.
        id: NodeId,
        /// Kind label ("single qubit gate", "two qubit gate").
        kind: &'static str,
        /// Gate operation name.
        operation: &'static str,
        /// Required number of outgoing wires.
        expected: usize,
        /// Actual number of outgoing wires.
        found: usize,
    },

    /// A measurement does not have exactly one incoming wire.
    #[error("measurement '{id}' must have exactly 1 input wire, found {found}")]
    MeasurementInputs {
        /// The measurement node.
        id: NodeId,
        /// Number of incoming wires.
        found: usize,
    },

    /// A gate has no wires at all.
    #[error("gate ({operation}) is not connected to the circuit")]
    OrphanedGate {
        /// The gate node.
        id: NodeId,
        /// Gate operation name.
        operation: &'static str,
    },

    /// Two nodes share an id.
    #[error("node id '{id}' is used by more than one node")]
    DuplicateNodeId {
        /// The repeated id.
        id: NodeId,
    },

    /// A wire references a node that is not in the snapshot.
    #[error("wire from '{from}' to '{target}' references missing node '{missing}'")]
    DanglingWire {
        /// Wire source id.
        from: NodeId,
        /// Wire target id.
        target: NodeId,
        /// The endpoint that does not exist.
        missing: NodeId,
    },

    /// A wire enters a qubit source.
    #[error("qubit '{id}' cannot have input wires")]
    WireIntoQubit {
        /// The qubit source.
        id: NodeId,
    },

    /// A wire leaves a measurement.
    #[error("measurement '{id}' cannot have output wires")]
    WireFromMeasurement {
        /// The measurement node.
        id: NodeId,
    },

    /// A two-qubit gate port is unused or used twice.
    #[error("two qubit gate ({operation}) must use handle {handle} exactly once, found {found}")]
    HandleMismatch {
        /// The gate node.
        id: NodeId,
        /// Gate operation name.
        operation: &'static str,
        /// The handle name.
        handle: &'static str,
        /// Number of wires attached to the handle.
        found: usize,
    },
}

impl StructuralError {
    /// The node the violation is attached to, if any.
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            StructuralError::NoQubits | StructuralError::MeasurementCountMismatch { .. } => None,
            StructuralError::QubitOutputs { id, .. }
            | StructuralError::GateInputs { id, .. }
            | StructuralError::GateOutputs { id, .. }
            | StructuralError::MeasurementInputs { id, .. }
            | StructuralError::OrphanedGate { id, .. }
            | StructuralError::DuplicateNodeId { id }
            | StructuralError::WireIntoQubit { id }
            | StructuralError::WireFromMeasurement { id }
            | StructuralError::HandleMismatch { id, .. } => Some(id),
            StructuralError::DanglingWire { missing, .. } => Some(missing),
        }
    }
}

/// Singular or plural noun for a wire count.
fn wires(n: usize) -> &'static str {
    if n == 1 { "wire" } else { "wires" }
}

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The graph failed structural validation.
    #[error("Invalid circuit: {0}")]
    Structural(#[from] StructuralError),

    /// Scheduling finished with gates or measurements that never became ready.
    #[error("Scheduling stalled: {} node(s) never received all inputs ({})", .nodes.len(), join_ids(.nodes))]
    Stalled {
        /// The unscheduled nodes, sorted by id.
        nodes: Vec<NodeId>,
    },

    /// The initial tableau does not match the compiled qubit count.
    #[error("Initial tableau acts on {found} qubits but the circuit has {expected}")]
    TableauMismatch {
        /// Compiled qubit count.
        expected: usize,
        /// Qubits in the supplied tableau.
        found: usize,
    },

    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] qwire_ir::IrError),
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter().map(NodeId::as_str).collect::<Vec<_>>().join(", ")
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_messages_name_operation() {
        let err = StructuralError::GateOutputs {
            id: NodeId::new("g1"),
            kind: "single qubit gate",
            operation: "hadamard",
            expected: 1,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "single qubit gate (hadamard) must have exactly 1 output wire, found 0"
        );

        let err = StructuralError::GateInputs {
            id: NodeId::new("g2"),
            kind: "two qubit gate",
            operation: "cnot",
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "two qubit gate (cnot) must have exactly 2 input wires, found 1"
        );
    }

    #[test]
    fn test_count_mismatch_cites_both_counts() {
        let err = StructuralError::MeasurementCountMismatch {
            qubits: 3,
            measurements: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn test_stalled_lists_nodes() {
        let err = CompileError::Stalled {
            nodes: vec![NodeId::new("cx"), NodeId::new("m1")],
        };
        assert_eq!(
            err.to_string(),
            "Scheduling stalled: 2 node(s) never received all inputs (cx, m1)"
        );
    }

    #[test]
    fn test_structural_wraps_with_prefix() {
        let err: CompileError = StructuralError::NoQubits.into();
        assert_eq!(err.to_string(), "Invalid circuit: no qubits found; add at least one qubit");
    }

    #[test]
    fn test_node_accessor() {
        assert!(StructuralError::NoQubits.node().is_none());
        let err = StructuralError::WireIntoQubit {
            id: NodeId::new("q0"),
        };
        assert_eq!(err.node().map(NodeId::as_str), Some("q0"));
    }
}
