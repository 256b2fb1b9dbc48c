//! qwire Circuit Graph Model
//!
//! This crate holds the data a visual circuit editor hands to the qwire
//! compiler: a snapshot of typed nodes connected by directed wires.
//!
//! # Overview
//!
//! - **Nodes**: [`Node`] with a closed [`NodeKind`] (qubit source, single-qubit
//!   gate, two-qubit gate, measurement) and a canvas [`Position`]
//! - **Operations**: [`SingleQubitOp`], [`TwoQubitOp`] and the emitted
//!   [`Operation`] vocabulary
//! - **Wires**: [`Edge`] with optional [`Handle`]s for two-qubit gate ports
//! - **Graph**: [`CircuitGraph`], serializable in the editor's export shape
//! - **Tableaux**: [`Tableau`] for the stabilizer engine's state encoding
//!
//! # Example: Loading an Editor Export
//!
//! ```rust
//! use qwire_ir::CircuitGraph;
//!
//! let graph = CircuitGraph::from_json(r#"{
//!     "nodes": [
//!         {"id": "q0", "type": "qubitNode", "position": {"x": 0, "y": 100}, "data": {"value": 0}},
//!         {"id": "h", "type": "singleQubitGateNode", "position": {"x": 100, "y": 100}, "data": {"operation": "hadamard"}},
//!         {"id": "m", "type": "measurementNode", "position": {"x": 200, "y": 100}, "data": {}}
//!     ],
//!     "edges": [
//!         {"source": "q0", "target": "h"},
//!         {"source": "h", "target": "m"}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(graph.num_qubit_sources(), 1);
//! assert_eq!(graph.num_measurements(), 1);
//! ```
//!
//! # Gate Vocabulary
//!
//! | Operation | Qubits | Description |
//! |-----------|--------|-------------|
//! | `hadamard` | 1 | Hadamard gate |
//! | `pauli_x`, `pauli_y`, `pauli_z` | 1 | Pauli gates |
//! | `phase` | 1 | S gate |
//! | `t` | 1 | T gate |
//! | `cnot` | 2 | Controlled-NOT |
//! | `swap` | 2 | SWAP gate |
//! | `cphase` | 2 | Controlled phase |

pub mod edge;
pub mod error;
pub mod gate;
pub mod graph;
pub mod node;
pub mod tableau;

pub use edge::{Edge, Handle};
pub use error::{IrError, IrResult};
pub use gate::{Operation, SingleQubitOp, TwoQubitOp};
pub use graph::CircuitGraph;
pub use node::{Node, NodeId, NodeKind, Position, QubitValue};
pub use tableau::{Pauli, Phase, Tableau};
