//! Quantum error correction requests and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use qwire_ir::Tableau;

use crate::error::{HalError, HalResult};

/// Supported error correcting codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QecCode {
    /// 3-qubit bit-flip repetition code.
    BitFlip,
    /// 3-qubit phase-flip repetition code.
    PhaseFlip,
    /// Steane 7-qubit code.
    Steane,
}

impl QecCode {
    /// All codes.
    pub const ALL: [QecCode; 3] = [QecCode::BitFlip, QecCode::PhaseFlip, QecCode::Steane];

    /// Number of physical qubits in the code.
    pub fn num_qubits(self) -> usize {
        match self {
            QecCode::BitFlip | QecCode::PhaseFlip => 3,
            QecCode::Steane => 7,
        }
    }

    /// Wire name of the code.
    pub fn name(self) -> &'static str {
        match self {
            QecCode::BitFlip => "bit_flip",
            QecCode::PhaseFlip => "phase_flip",
            QecCode::Steane => "steane",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            QecCode::BitFlip => "3-qubit bit-flip code, corrects single X errors",
            QecCode::PhaseFlip => "3-qubit phase-flip code, corrects single Z errors",
            QecCode::Steane => "Steane 7-qubit code, corrects any single-qubit error",
        }
    }
}

impl fmt::Display for QecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QecCode {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.name() == s)
            .ok_or_else(|| {
                HalError::InvalidRequest(format!(
                    "unknown code '{s}', expected bit_flip, phase_flip or steane"
                ))
            })
    }
}

/// Pauli error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliKind {
    /// Bit flip.
    X,
    /// Combined bit and phase flip.
    Y,
    /// Phase flip.
    Z,
}

impl fmt::Display for PauliKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PauliKind::X => "X",
            PauliKind::Y => "Y",
            PauliKind::Z => "Z",
        };
        f.write_str(s)
    }
}

impl FromStr for PauliKind {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(PauliKind::X),
            "Y" | "y" => Ok(PauliKind::Y),
            "Z" | "z" => Ok(PauliKind::Z),
            other => Err(HalError::InvalidRequest(format!(
                "unknown Pauli error '{other}', expected X, Y or Z"
            ))),
        }
    }
}

/// A single-qubit Pauli applied to one physical qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliError {
    /// Error kind.
    #[serde(rename = "type")]
    pub kind: PauliKind,
    /// Target qubit.
    pub qubit: usize,
}

impl PauliError {
    /// Create a new error.
    pub fn new(kind: PauliKind, qubit: usize) -> Self {
        Self { kind, qubit }
    }
}

impl fmt::Display for PauliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on qubit {}", self.kind, self.qubit)
    }
}

impl FromStr for PauliError {
    type Err = HalError;

    /// Parse `KIND:QUBIT`, e.g. `X:1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, qubit) = s
            .split_once(':')
            .ok_or_else(|| HalError::InvalidRequest(format!("expected KIND:QUBIT, got '{s}'")))?;
        let qubit = qubit
            .trim()
            .parse()
            .map_err(|_| HalError::InvalidRequest(format!("invalid qubit index in '{s}'")))?;
        Ok(Self::new(kind.trim().parse()?, qubit))
    }
}

/// Request body for error correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QecRequest {
    /// Code to simulate.
    pub code_type: QecCode,
    /// Errors to inject, in order.
    pub errors: Vec<PauliError>,
}

impl QecRequest {
    /// Create a request with no injected errors.
    pub fn new(code_type: QecCode) -> Self {
        Self {
            code_type,
            errors: Vec::new(),
        }
    }

    /// Add an error.
    #[must_use]
    pub fn with_error(mut self, kind: PauliKind, qubit: usize) -> Self {
        self.errors.push(PauliError::new(kind, qubit));
        self
    }

    /// Check that every error targets a qubit of the code.
    pub fn validate(&self) -> HalResult<()> {
        let n = self.code_type.num_qubits();
        if let Some(err) = self.errors.iter().find(|e| e.qubit >= n) {
            return Err(HalError::InvalidRequest(format!(
                "error {err} is outside the {} code's {n} qubits",
                self.code_type
            )));
        }
        Ok(())
    }
}

/// Code state at one point of the correction cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QecSnapshot {
    /// Stabilizer tableau.
    #[serde(flatten)]
    pub tableau: Tableau,
    /// Syndrome measurement outcomes.
    #[serde(default)]
    pub syndrome: Vec<u8>,
}

impl QecSnapshot {
    /// Check if every syndrome bit is zero.
    pub fn is_clean(&self) -> bool {
        self.syndrome.iter().all(|&s| s == 0)
    }
}

/// Correction chosen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovery {
    /// Pauli to apply.
    #[serde(rename = "type")]
    pub kind: PauliKind,
    /// Target qubit.
    pub qubit: usize,
}

/// How a correction cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QecOutcome {
    /// No error was detected.
    NoError,
    /// The detected error was corrected.
    Corrected,
    /// The syndrome matched no correctable error.
    Uncorrectable,
}

/// Result of an error correction cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QecResult {
    /// Encoded state before errors.
    pub initial: QecSnapshot,
    /// State after injecting errors.
    pub after_errors: QecSnapshot,
    /// State after applying the recovery, if any.
    #[serde(default)]
    pub after_recovery: Option<QecSnapshot>,
    /// The recovery operation, if one was found.
    #[serde(default)]
    pub recovery: Option<Recovery>,
    /// Whether the injected errors produced a non-trivial syndrome.
    #[serde(default)]
    pub has_error: bool,
}

impl QecResult {
    /// Extract from an engine response body.
    ///
    /// `initial` and `afterErrors` are required; every tableau must act on
    /// the code's qubits.
    pub fn from_response(body: &Value, code: QecCode) -> HalResult<Self> {
        for field in ["initial", "afterErrors"] {
            if body.get(field).is_none_or(Value::is_null) {
                return Err(HalError::ResponseShape(format!("missing '{field}'")));
            }
        }
        let result: QecResult = serde_json::from_value(body.clone())
            .map_err(|e| HalError::ResponseShape(format!("malformed QEC result: {e}")))?;

        let n = code.num_qubits();
        let snapshots = [
            Some(&result.initial),
            Some(&result.after_errors),
            result.after_recovery.as_ref(),
        ];
        for snapshot in snapshots.into_iter().flatten() {
            snapshot
                .tableau
                .validate()
                .map_err(|e| HalError::ResponseShape(e.to_string()))?;
            if snapshot.tableau.num_qubits() != n {
                return Err(HalError::ResponseShape(format!(
                    "tableau acts on {} qubits, {code} code has {n}",
                    snapshot.tableau.num_qubits()
                )));
            }
        }
        Ok(result)
    }

    /// Classify the cycle.
    pub fn outcome(&self) -> QecOutcome {
        match (self.has_error, self.recovery.is_some()) {
            (false, _) => QecOutcome::NoError,
            (true, true) => QecOutcome::Corrected,
            (true, false) => QecOutcome::Uncorrectable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(bit: u8, syndrome: [u8; 2]) -> Value {
        json!({
            "x": [[bit, 0, 0], [0, 0, 0]],
            "z": [[0, 0, 0], [1, 1, 0]],
            "r": [0, 0],
            "syndrome": syndrome
        })
    }

    #[test]
    fn test_request_shape() {
        let req = QecRequest::new(QecCode::BitFlip).with_error(PauliKind::X, 1);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "codeType": "bit_flip", "errors": [{ "type": "X", "qubit": 1 }] })
        );
    }

    #[test]
    fn test_request_validation() {
        QecRequest::new(QecCode::Steane)
            .with_error(PauliKind::Y, 6)
            .validate()
            .unwrap();
        let err = QecRequest::new(QecCode::PhaseFlip)
            .with_error(PauliKind::Z, 3)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("phase_flip"));
    }

    #[test]
    fn test_parse_code_and_error() {
        assert_eq!("steane".parse::<QecCode>().unwrap().num_qubits(), 7);
        assert!("shor".parse::<QecCode>().is_err());
        assert_eq!(
            "X:2".parse::<PauliError>().unwrap(),
            PauliError::new(PauliKind::X, 2)
        );
        assert!("W:2".parse::<PauliError>().is_err());
        assert!("X2".parse::<PauliError>().is_err());
    }

    #[test]
    fn test_result_corrected() {
        let body = json!({
            "initial": snapshot(0, [0, 0]),
            "afterErrors": snapshot(1, [1, 0]),
            "afterRecovery": snapshot(0, [0, 0]),
            "recovery": { "type": "X", "qubit": 0 },
            "hasError": true
        });
        let result = QecResult::from_response(&body, QecCode::BitFlip).unwrap();
        assert_eq!(result.outcome(), QecOutcome::Corrected);
        assert!(result.initial.is_clean());
        assert!(!result.after_errors.is_clean());
        assert_eq!(result.recovery.unwrap().qubit, 0);
    }

    #[test]
    fn test_result_uncorrectable_and_clean() {
        let body = json!({
            "initial": snapshot(0, [0, 0]),
            "afterErrors": snapshot(1, [1, 1]),
            "hasError": true
        });
        let result = QecResult::from_response(&body, QecCode::BitFlip).unwrap();
        assert_eq!(result.outcome(), QecOutcome::Uncorrectable);

        let body = json!({ "initial": snapshot(0, [0, 0]), "afterErrors": snapshot(0, [0, 0]) });
        let result = QecResult::from_response(&body, QecCode::BitFlip).unwrap();
        assert_eq!(result.outcome(), QecOutcome::NoError);
    }

    #[test]
    fn test_result_missing_fields() {
        let body = json!({ "initial": snapshot(0, [0, 0]) });
        let err = QecResult::from_response(&body, QecCode::BitFlip).unwrap_err();
        assert!(err.to_string().contains("afterErrors"));
    }

    #[test]
    fn test_result_wrong_width() {
        let body = json!({ "initial": snapshot(0, [0, 0]), "afterErrors": snapshot(0, [0, 0]) });
        assert!(QecResult::from_response(&body, QecCode::Steane).is_err());
    }
}
