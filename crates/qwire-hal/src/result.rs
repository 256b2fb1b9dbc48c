//! Simulation results and response extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use qwire_ir::Tableau;

use crate::error::{HalError, HalResult};

/// Allowed deviation of a probability vector's sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Basis-state probabilities from a general circuit simulation.
///
/// Entry `i` is the probability of the basis state whose binary expansion,
/// padded to the qubit count, is `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    probabilities: Vec<f64>,
}

impl ProbabilityResult {
    /// Check a probability vector against the expected qubit count.
    pub fn new(probabilities: Vec<f64>, num_qubits: usize) -> HalResult<Self> {
        let expected = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or_else(|| HalError::InvalidRequest(format!("{num_qubits} qubits is too many")))?;
        if probabilities.len() != expected {
            return Err(HalError::ResponseShape(format!(
                "expected {expected} probabilities for {num_qubits} qubit(s), got {}",
                probabilities.len()
            )));
        }
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(HalError::ResponseShape(format!("invalid probability {bad}")));
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(HalError::ResponseShape(format!(
                "probabilities sum to {sum}, expected 1"
            )));
        }
        Ok(Self { probabilities })
    }

    /// Extract from an engine response body `{ "probabilities": [...] }`.
    pub fn from_response(body: &Value, num_qubits: usize) -> HalResult<Self> {
        let field = body
            .get("probabilities")
            .ok_or_else(|| HalError::ResponseShape("missing 'probabilities'".into()))?;
        let probabilities: Vec<f64> = serde_json::from_value(field.clone())
            .map_err(|e| HalError::ResponseShape(format!("malformed 'probabilities': {e}")))?;
        Self::new(probabilities, num_qubits)
    }

    /// The raw probability vector.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.probabilities.len().trailing_zeros() as usize
    }

    /// Ket label for basis index `i`, e.g. `|01⟩`.
    pub fn basis_label(&self, index: usize) -> String {
        format!("|{:0width$b}⟩", index, width = self.num_qubits())
    }

    /// Iterate `(label, probability)` pairs in basis order.
    pub fn labeled(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| (self.basis_label(i), p))
    }

    /// The most probable basis index; ties go to the lowest index.
    pub fn most_likely(&self) -> Option<(usize, f64)> {
        self.probabilities
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
    }
}

/// Stabilizer states after each applied operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilizerEvolution {
    /// One tableau per applied operation.
    pub evolution: Vec<Tableau>,
}

impl StabilizerEvolution {
    /// Extract from an engine response body `{ "evolution": [...] }`.
    ///
    /// Every tableau must be well formed and act on `num_qubits` qubits.
    pub fn from_response(body: &Value, num_qubits: usize) -> HalResult<Self> {
        let field = body
            .get("evolution")
            .ok_or_else(|| HalError::ResponseShape("missing 'evolution'".into()))?;
        let evolution: Vec<Tableau> = serde_json::from_value(field.clone())
            .map_err(|e| HalError::ResponseShape(format!("malformed 'evolution': {e}")))?;
        for (step, tableau) in evolution.iter().enumerate() {
            tableau
                .validate()
                .map_err(|e| HalError::ResponseShape(format!("step {step}: {e}")))?;
            if tableau.num_generators() > 0 && tableau.num_qubits() != num_qubits {
                return Err(HalError::ResponseShape(format!(
                    "step {step} acts on {} qubits, expected {num_qubits}",
                    tableau.num_qubits()
                )));
            }
        }
        Ok(Self { evolution })
    }

    /// The state after the last operation.
    pub fn final_state(&self) -> Option<&Tableau> {
        self.evolution.last()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.evolution.len()
    }

    /// Check if no steps were recorded.
    pub fn is_empty(&self) -> bool {
        self.evolution.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probability_shape_ok() {
        let r = ProbabilityResult::new(vec![0.5, 0.0, 0.0, 0.5], 2).unwrap();
        assert_eq!(r.num_qubits(), 2);
        assert_eq!(r.basis_label(1), "|01⟩");
        assert_eq!(r.most_likely(), Some((0, 0.5)));
    }

    #[test]
    fn test_probability_length_checked() {
        let err = ProbabilityResult::new(vec![1.0, 0.0], 2).unwrap_err();
        assert!(matches!(err, HalError::ResponseShape(_)));
    }

    #[test]
    fn test_probability_sum_checked() {
        assert!(ProbabilityResult::new(vec![0.5, 0.4], 1).is_err());
        assert!(ProbabilityResult::new(vec![0.5, 0.5 + 1e-9], 1).is_ok());
        assert!(ProbabilityResult::new(vec![1.5, -0.5], 1).is_err());
    }

    #[test]
    fn test_probability_from_response() {
        let body = json!({ "probabilities": [0.0, 1.0] });
        let r = ProbabilityResult::from_response(&body, 1).unwrap();
        let labels: Vec<_> = r.labeled().map(|(l, _)| l).collect();
        assert_eq!(labels, ["|0⟩", "|1⟩"]);

        let missing = ProbabilityResult::from_response(&json!({}), 1).unwrap_err();
        assert!(missing.to_string().contains("probabilities"));

        let wrong_type = ProbabilityResult::from_response(&json!({ "probabilities": "x" }), 1);
        assert!(matches!(wrong_type, Err(HalError::ResponseShape(_))));
    }

    #[test]
    fn test_evolution_from_response() {
        let body = json!({
            "evolution": [
                { "x": [[1]], "z": [[0]], "r": [0] },
                { "x": [[0]], "z": [[1]], "r": [0] }
            ]
        });
        let evo = StabilizerEvolution::from_response(&body, 1).unwrap();
        assert_eq!(evo.len(), 2);
        assert_eq!(evo.final_state().unwrap().generators(), ["+Z"]);
    }

    #[test]
    fn test_evolution_width_checked() {
        let body = json!({ "evolution": [{ "x": [[1, 0]], "z": [[0, 0]], "r": [0] }] });
        assert!(StabilizerEvolution::from_response(&body, 1).is_err());
        assert!(StabilizerEvolution::from_response(&json!({ "states": [] }), 1).is_err());
    }
}
