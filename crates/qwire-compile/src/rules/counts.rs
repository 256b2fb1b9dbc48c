//! Whole-graph count checks.

use crate::adjacency::Adjacency;
use crate::error::StructuralError;
use crate::rule::ValidationRule;

/// At least one qubit source must exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct QubitPresence;

impl ValidationRule for QubitPresence {
    fn name(&self) -> &str {
        "qubit_presence"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        if adjacency.graph().num_qubit_sources() == 0 {
            return Err(StructuralError::NoQubits);
        }
        Ok(())
    }
}

/// Measurement count must equal qubit source count.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementParity;

impl ValidationRule for MeasurementParity {
    fn name(&self) -> &str {
        "measurement_parity"
    }

    fn check(&self, adjacency: &Adjacency<'_>) -> Result<(), StructuralError> {
        let graph = adjacency.graph();
        let qubits = graph.num_qubit_sources();
        let measurements = graph.num_measurements();
        if qubits != measurements {
            return Err(StructuralError::MeasurementCountMismatch {
                qubits,
                measurements,
            });
        }
        Ok(())
    }
}
