//! qwire Compilation
//!
//! This crate turns a [`CircuitGraph`](qwire_ir::CircuitGraph) snapshot into
//! an ordered, index-based operation list ready for a simulation engine.
//!
//! # Overview
//!
//! Compilation runs three stages over a shared [`Adjacency`]:
//!
//! - **Validation**: a [`StructuralValidator`] runs [`ValidationRule`]s in a
//!   fixed order and stops at the first violation
//! - **Scheduling**: [`schedule`] propagates logical lines from the qubit
//!   sources and orders gates and measurements by data dependency
//! - **Emission**: [`emit`] builds a [`CompiledCircuit`], from which the
//!   [`CircuitRequest`] and [`StabilizerRequest`] payloads are derived
//!
//! # Example
//!
//! ```rust
//! use qwire_compile::{Compiler, EndpointMode};
//! use qwire_ir::{CircuitGraph, Handle, QubitValue, SingleQubitOp, TwoQubitOp};
//!
//! let mut g = CircuitGraph::new();
//! let q0 = g.qubit("q0", QubitValue::Zero, 0.0);
//! let q1 = g.qubit("q1", QubitValue::Zero, 100.0);
//! let h = g.single_gate("h", SingleQubitOp::Hadamard, 0.0);
//! let cx = g.two_gate("cx", TwoQubitOp::Cnot, 50.0);
//! let m0 = g.measurement("m0", 0.0);
//! let m1 = g.measurement("m1", 100.0);
//! g.connect(&q0, &h);
//! g.connect_handles(&h, None, &cx, Some(Handle::Input1));
//! g.connect_handles(&q1, None, &cx, Some(Handle::Input2));
//! g.connect_handles(&cx, Some(Handle::Output1), &m0, None);
//! g.connect_handles(&cx, Some(Handle::Output2), &m1, None);
//!
//! let compiled = Compiler::new(EndpointMode::Circuit).compile(&g).unwrap();
//! assert_eq!(compiled.num_qubits(), 2);
//! assert_eq!(compiled.operations.len(), 4);
//! ```

pub mod adjacency;
pub mod compiler;
pub mod emit;
pub mod error;
pub mod rule;
pub mod rules;
pub mod schedule;
pub mod validator;

pub use adjacency::{Adjacency, NodeIndex, Outgoing, Wire};
pub use compiler::{CompilePhase, Compiler, compile};
pub use emit::{
    CircuitRequest, CompiledCircuit, EndpointMode, OperationSpec, QubitDescriptor, QubitNode,
    StabilizerRequest, emit,
};
pub use error::{CompileError, CompileResult, StructuralError};
pub use rule::ValidationRule;
pub use schedule::{LogicalQubit, PendingInputs, Schedule, ScheduledOp, schedule};
pub use validator::StructuralValidator;

/// Check a snapshot against the standard rules.
pub fn validate(graph: &qwire_ir::CircuitGraph) -> Result<(), StructuralError> {
    StructuralValidator::standard().validate(graph)
}
