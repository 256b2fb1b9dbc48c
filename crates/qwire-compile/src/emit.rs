//! Emission of compiled circuits and engine request payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use qwire_ir::{Node, NodeId, Operation, QubitValue, Tableau};

use crate::error::{CompileError, CompileResult};
use crate::schedule::{LogicalQubit, ScheduledOp};

/// Which simulation endpoint a compilation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointMode {
    /// General circuit simulation; measurements stay in the operation list.
    #[default]
    Circuit,
    /// Stabilizer evolution; measurements are dropped.
    Stabilizer,
}

impl EndpointMode {
    /// Check if measurement operations are emitted in this mode.
    #[inline]
    pub fn includes_measurements(self) -> bool {
        matches!(self, EndpointMode::Circuit)
    }

    /// Get the mode name.
    pub fn name(self) -> &'static str {
        match self {
            EndpointMode::Circuit => "circuit",
            EndpointMode::Stabilizer => "stabilizer",
        }
    }
}

impl fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EndpointMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circuit" => Ok(EndpointMode::Circuit),
            "stabilizer" => Ok(EndpointMode::Stabilizer),
            other => Err(format!(
                "unknown endpoint mode '{other}', expected 'circuit' or 'stabilizer'"
            )),
        }
    }
}

/// One logical qubit of a compiled circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitDescriptor {
    /// Logical line index.
    pub index: LogicalQubit,
    /// The qubit source node.
    pub id: NodeId,
    /// Initial basis value.
    pub value: QubitValue,
}

/// An operation in emitted form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationSpec {
    /// The operation.
    pub operation: Operation,
    /// Logical lines consumed, in slot order.
    pub inputs: Vec<LogicalQubit>,
}

impl From<&ScheduledOp> for OperationSpec {
    fn from(op: &ScheduledOp) -> Self {
        Self {
            operation: op.operation,
            inputs: op.inputs.clone(),
        }
    }
}

/// Result of compiling a circuit graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledCircuit {
    /// Target endpoint mode.
    pub mode: EndpointMode,
    /// Qubit descriptors in logical order.
    pub qubits: Vec<QubitDescriptor>,
    /// Operations in scheduled order.
    pub operations: Vec<OperationSpec>,
}

impl CompiledCircuit {
    /// Number of logical qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Number of emitted operations that are not measurements.
    pub fn gate_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| !op.operation.is_measurement())
            .count()
    }

    /// Build the general circuit simulation request.
    pub fn to_circuit_request(&self) -> CircuitRequest {
        CircuitRequest {
            qubit_nodes: self
                .qubits
                .iter()
                .map(|q| QubitNode {
                    id: q.id.clone(),
                    value: q.value,
                })
                .collect(),
            operations: self.operations.clone(),
        }
    }

    /// Build the stabilizer evolution request.
    ///
    /// Measurements are never sent to the stabilizer engine, whatever mode
    /// this circuit was compiled in. A supplied tableau must act on exactly
    /// as many qubits as the circuit has.
    pub fn to_stabilizer_request(
        &self,
        initial_tableau: Option<Tableau>,
    ) -> CompileResult<StabilizerRequest> {
        if let Some(tableau) = &initial_tableau {
            tableau.validate()?;
            if tableau.num_qubits() != self.num_qubits() {
                return Err(CompileError::TableauMismatch {
                    expected: self.num_qubits(),
                    found: tableau.num_qubits(),
                });
            }
        }
        Ok(StabilizerRequest {
            num_qubits: self.num_qubits(),
            operations: self
                .operations
                .iter()
                .filter(|op| !op.operation.is_measurement())
                .cloned()
                .collect(),
            initial_tableau,
        })
    }
}

/// A qubit entry in the general simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitNode {
    /// The qubit source id.
    pub id: NodeId,
    /// Initial basis value.
    pub value: QubitValue,
}

/// Request body for general circuit simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitRequest {
    /// Qubits in logical order.
    pub qubit_nodes: Vec<QubitNode>,
    /// Operations in scheduled order.
    pub operations: Vec<OperationSpec>,
}

/// Request body for stabilizer evolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilizerRequest {
    /// Number of logical qubits.
    pub num_qubits: usize,
    /// Unitary operations in scheduled order.
    pub operations: Vec<OperationSpec>,
    /// Starting state; the engine uses `|0...0>` when absent.
    pub initial_tableau: Option<Tableau>,
}

/// Turn scheduled operations into a [`CompiledCircuit`].
///
/// `qubit_sources` must already be in logical order, as returned by
/// [`CircuitGraph::ordered_qubit_sources`](qwire_ir::CircuitGraph::ordered_qubit_sources).
/// Sources without a value fall back to `|0⟩`. Only the first `u32::MAX + 1`
/// sources can be indexed; any beyond that are left out.
pub fn emit(ops: &[ScheduledOp], qubit_sources: &[&Node], mode: EndpointMode) -> CompiledCircuit {
    let qubits = qubit_sources
        .iter()
        .enumerate()
        .map_while(|(i, node)| {
            let index = LogicalQubit::try_from(i).ok()?;
            Some(QubitDescriptor {
                index,
                id: node.id.clone(),
                value: node.qubit_value().unwrap_or_default(),
            })
        })
        .collect();

    let operations = ops
        .iter()
        .filter(|op| mode.includes_measurements() || !op.operation.is_measurement())
        .map(OperationSpec::from)
        .collect();

    CompiledCircuit {
        mode,
        qubits,
        operations,
    }
}
