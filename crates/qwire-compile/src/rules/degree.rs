//! Per-node wire count checks.

use qwire_ir::NodeKind;

use crate::adjacency::{Adjacency, NodeIndex};
use crate::error::StructuralError;
use crate::rule::ValidationRule;

/// Every qubit source has exactly one outgoing wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct QubitFanOut;

impl ValidationRule for QubitFanOut {
    fn name(&self) -> &str {
        "qubit_fan_out"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for ix in adjacency.nodes_by_id() {
            let node = adjacency.node(ix);
            if !node.kind.is_qubit_source() {
                continue;
            }
            let found = adjacency.out_degree(ix);
            if found != 1 {
                return Err(StructuralError::QubitOutputs {
                    id: node.id.clone(),
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Gates have exactly as many incoming and outgoing wires as their arity.
///
/// Single-qubit gates are checked before two-qubit gates; within a gate the
/// incoming count is checked first.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateDegree;

impl GateDegree {
    fn check_gate(
        adjacency: &Adjacency<'_>,
        ix: NodeIndex,
        operation: &'static str,
        arity: usize,
    ) -> Result<(), StructuralError> {
        let node = adjacency.node(ix);
        let kind = node.kind.label();

        let found = adjacency.in_degree(ix);
        if found != arity {
            return Err(StructuralError::GateInputs {
                id: node.id.clone(),
                kind,
                operation,
                expected: arity,
                found,
            });
        }

        let found = adjacency.out_degree(ix);
        if found != arity {
            return Err(StructuralError::GateOutputs {
                id: node.id.clone(),
                kind,
                operation,
                expected: arity,
                found,
            });
        }
        Ok(())
    }
}

impl ValidationRule for GateDegree {
    fn name(&self) -> &str {
        "gate_degree"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for ix in adjacency.nodes_by_id() {
            if let NodeKind::SingleQubitGate { operation } = adjacency.node(ix).kind {
                Self::check_gate(adjacency, ix, operation.name(), 1)?;
            }
        }
        for ix in adjacency.nodes_by_id() {
            if let NodeKind::TwoQubitGate { operation } = adjacency.node(ix).kind {
                Self::check_gate(adjacency, ix, operation.name(), 2)?;
            }
        }
        Ok(())
    }
}

/// Every measurement has exactly one incoming wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementFanIn;

impl ValidationRule for MeasurementFanIn {
    fn name(&self) -> &str {
        "measurement_fan_in"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for ix in adjacency.nodes_by_id() {
            let node = adjacency.node(ix);
            if !node.kind.is_measurement() {
                continue;
            }
            let found = adjacency.in_degree(ix);
            if found != 1 {
                return Err(StructuralError::MeasurementInputs {
                    id: node.id.clone(),
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Every gate has at least one wire attached.
///
/// Subsumed by [`GateDegree`] when both run, but kept as a separate check
/// so a custom validator without degree checks still rejects stray gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOrphanGates;

impl ValidationRule for NoOrphanGates {
    fn name(&self) -> &str {
        "no_orphan_gates"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        for ix in adjacency.nodes_by_id() {
            let node = adjacency.node(ix);
            let Some(operation) = node.kind.operation_name() else {
                continue;
            };
            if adjacency.in_degree(ix) == 0 && adjacency.out_degree(ix) == 0 {
                return Err(StructuralError::OrphanedGate {
                    id: node.id.clone(),
                    operation,
                });
            }
        }
        Ok(())
    }
}
