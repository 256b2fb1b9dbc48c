//! Gate operation vocabulary.
//!
//! The editor offers a fixed palette of gates. Each palette entry maps to one
//! variant here; the string names are the ones the simulation engine expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IrError;

/// Single-qubit gate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleQubitOp {
    /// Hadamard gate.
    Hadamard,
    /// Pauli-X gate.
    PauliX,
    /// Pauli-Y gate.
    PauliY,
    /// Pauli-Z gate.
    PauliZ,
    /// Phase (S) gate.
    Phase,
    /// T gate.
    T,
}

impl SingleQubitOp {
    /// Every single-qubit operation, in palette order.
    pub const ALL: [SingleQubitOp; 6] = [
        SingleQubitOp::Hadamard,
        SingleQubitOp::PauliX,
        SingleQubitOp::PauliY,
        SingleQubitOp::PauliZ,
        SingleQubitOp::Phase,
        SingleQubitOp::T,
    ];

    /// Get the wire name of this operation.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            SingleQubitOp::Hadamard => "hadamard",
            SingleQubitOp::PauliX => "pauli_x",
            SingleQubitOp::PauliY => "pauli_y",
            SingleQubitOp::PauliZ => "pauli_z",
            SingleQubitOp::Phase => "phase",
            SingleQubitOp::T => "t",
        }
    }
}

impl FromStr for SingleQubitOp {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| IrError::UnknownOperation {
                kind: "single qubit gate",
                operation: s.to_string(),
            })
    }
}

impl fmt::Display for SingleQubitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-qubit gate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoQubitOp {
    /// Controlled-NOT; `input1` is the control.
    Cnot,
    /// SWAP gate.
    Swap,
    /// Controlled phase gate.
    Cphase,
}

impl TwoQubitOp {
    /// Every two-qubit operation, in palette order.
    pub const ALL: [TwoQubitOp; 3] = [TwoQubitOp::Cnot, TwoQubitOp::Swap, TwoQubitOp::Cphase];

    /// Get the wire name of this operation.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            TwoQubitOp::Cnot => "cnot",
            TwoQubitOp::Swap => "swap",
            TwoQubitOp::Cphase => "cphase",
        }
    }
}

impl FromStr for TwoQubitOp {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| IrError::UnknownOperation {
                kind: "two qubit gate",
                operation: s.to_string(),
            })
    }
}

impl fmt::Display for TwoQubitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An operation in the emitted operation list.
///
/// Serializes as its bare wire name (`"hadamard"`, `"cnot"`, `"measurement"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A single-qubit gate.
    Single(SingleQubitOp),
    /// A two-qubit gate.
    Two(TwoQubitOp),
    /// Terminal measurement of one logical line.
    Measurement,
}

impl Operation {
    /// Wire name of the measurement operation.
    pub const MEASUREMENT: &'static str = "measurement";

    /// Get the wire name of this operation.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Single(op) => op.name(),
            Operation::Two(op) => op.name(),
            Operation::Measurement => Self::MEASUREMENT,
        }
    }

    /// Number of logical lines this operation consumes.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            Operation::Single(_) | Operation::Measurement => 1,
            Operation::Two(_) => 2,
        }
    }

    /// Check if this is a measurement.
    #[inline]
    pub fn is_measurement(self) -> bool {
        matches!(self, Operation::Measurement)
    }
}

impl From<SingleQubitOp> for Operation {
    fn from(op: SingleQubitOp) -> Self {
        Operation::Single(op)
    }
}

impl From<TwoQubitOp> for Operation {
    fn from(op: TwoQubitOp) -> Self {
        Operation::Two(op)
    }
}

impl FromStr for Operation {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::MEASUREMENT {
            return Ok(Operation::Measurement);
        }
        if let Ok(op) = s.parse::<SingleQubitOp>() {
            return Ok(Operation::Single(op));
        }
        s.parse::<TwoQubitOp>()
            .map(Operation::Two)
            .map_err(|_| IrError::UnknownOperation {
                kind: "circuit",
                operation: s.to_string(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_qubit_names_parse_back() {
        for op in SingleQubitOp::ALL {
            assert_eq!(op.name().parse::<SingleQubitOp>().unwrap(), op);
        }
        assert_eq!(SingleQubitOp::PauliX.name(), "pauli_x");
    }

    #[test]
    fn test_unknown_single_qubit_op() {
        let err = "rx".parse::<SingleQubitOp>().unwrap_err();
        assert!(err.to_string().contains("single qubit gate"));
        assert!(err.to_string().contains("rx"));
    }

    #[test]
    fn test_two_qubit_is_not_single() {
        assert!("cnot".parse::<SingleQubitOp>().is_err());
        assert_eq!("cnot".parse::<TwoQubitOp>().unwrap(), TwoQubitOp::Cnot);
    }

    #[test]
    fn test_operation_arity() {
        assert_eq!(Operation::from(SingleQubitOp::T).num_qubits(), 1);
        assert_eq!(Operation::from(TwoQubitOp::Swap).num_qubits(), 2);
        assert_eq!(Operation::Measurement.num_qubits(), 1);
        assert!(Operation::Measurement.is_measurement());
    }

    #[test]
    fn test_operation_serializes_as_name() {
        let json = serde_json::to_string(&Operation::Two(TwoQubitOp::Cphase)).unwrap();
        assert_eq!(json, "\"cphase\"");
        let op: Operation = serde_json::from_str("\"measurement\"").unwrap();
        assert_eq!(op, Operation::Measurement);
        assert!(serde_json::from_str::<Operation>("\"toffoli\"").is_err());
    }
}
