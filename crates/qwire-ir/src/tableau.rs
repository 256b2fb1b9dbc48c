//! Stabilizer tableau interchange format.
//!
//! The simulation engine represents stabilizer states as generator rows of
//! `(x, z)` bit pairs plus a phase code. This module only converts between
//! that encoding and signed Pauli strings such as `"-iXZY"`; it performs no
//! Pauli algebra.
//!
//! | `(x, z)` | Pauli |   | `r` | Phase |
//! |----------|-------|---|-----|-------|
//! | `00`     | I     |   | 0   | +1    |
//! | `10`     | X     |   | 1   | -1    |
//! | `01`     | Z     |   | 2   | +i    |
//! | `11`     | Y     |   | 3   | -i    |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Decode from `(x, z)` bits.
    pub fn from_bits(x: u8, z: u8) -> Option<Self> {
        match (x, z) {
            (0, 0) => Some(Pauli::I),
            (1, 0) => Some(Pauli::X),
            (0, 1) => Some(Pauli::Z),
            (1, 1) => Some(Pauli::Y),
            _ => None,
        }
    }

    /// Encode as `(x, z)` bits.
    pub fn bits(self) -> (u8, u8) {
        match self {
            Pauli::I => (0, 0),
            Pauli::X => (1, 0),
            Pauli::Z => (0, 1),
            Pauli::Y => (1, 1),
        }
    }

    /// Parse an upper-case Pauli letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// Upper-case letter for this operator.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

/// Phase of a stabilizer generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// +1
    #[default]
    PlusOne,
    /// -1
    MinusOne,
    /// +i
    PlusI,
    /// -i
    MinusI,
}

impl Phase {
    /// Decode from the engine's phase code.
    pub fn from_code(r: u8) -> Option<Self> {
        match r {
            0 => Some(Phase::PlusOne),
            1 => Some(Phase::MinusOne),
            2 => Some(Phase::PlusI),
            3 => Some(Phase::MinusI),
            _ => None,
        }
    }

    /// Engine phase code.
    pub fn code(self) -> u8 {
        match self {
            Phase::PlusOne => 0,
            Phase::MinusOne => 1,
            Phase::PlusI => 2,
            Phase::MinusI => 3,
        }
    }

    /// Display prefix for a generator row.
    pub fn symbol(self) -> &'static str {
        match self {
            Phase::PlusOne => "+",
            Phase::MinusOne => "-",
            Phase::PlusI => "+i",
            Phase::MinusI => "-i",
        }
    }

    /// Split a leading sign (`+`, `-`, `+1`, `-1`, `+i`, `-i`) off a row.
    fn split_prefix(row: &str) -> (Self, &str) {
        for (prefix, phase) in [
            ("+i", Phase::PlusI),
            ("-i", Phase::MinusI),
            ("+1", Phase::PlusOne),
            ("-1", Phase::MinusOne),
            ("+", Phase::PlusOne),
            ("-", Phase::MinusOne),
        ] {
            if let Some(rest) = row.strip_prefix(prefix) {
                return (phase, rest);
            }
        }
        (Phase::PlusOne, row)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Stabilizer tableau in the engine's bit-matrix encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tableau {
    /// X bits, one row per generator, one column per qubit.
    pub x: Vec<Vec<u8>>,
    /// Z bits, same shape as `x`.
    pub z: Vec<Vec<u8>>,
    /// Phase code per generator.
    pub r: Vec<u8>,
}

impl Tableau {
    /// Build a tableau from signed Pauli strings, one per generator.
    ///
    /// Whitespace is ignored, so `"+1 X Z I"` and `"+XZI"` are equivalent.
    pub fn from_generators<I, S>(rows: I) -> IrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tableau = Tableau::default();
        for (index, row) in rows.into_iter().enumerate() {
            let compact: String = row.as_ref().chars().filter(|c| !c.is_whitespace()).collect();
            let (phase, letters) = Phase::split_prefix(&compact);

            let mut x_row = Vec::with_capacity(letters.len());
            let mut z_row = Vec::with_capacity(letters.len());
            for c in letters.chars() {
                let pauli = Pauli::from_char(c).ok_or_else(|| {
                    IrError::InvalidTableau(format!("generator {index}: invalid Pauli '{c}'"))
                })?;
                let (x, z) = pauli.bits();
                x_row.push(x);
                z_row.push(z);
            }

            if let Some(first) = tableau.x.first() {
                if first.len() != x_row.len() {
                    return Err(IrError::InvalidTableau(format!(
                        "generator {index} acts on {} qubits, expected {}",
                        x_row.len(),
                        first.len()
                    )));
                }
            }

            tableau.x.push(x_row);
            tableau.z.push(z_row);
            tableau.r.push(phase.code());
        }
        Ok(tableau)
    }

    /// Number of qubits the generators act on.
    pub fn num_qubits(&self) -> usize {
        self.x.first().map_or(0, Vec::len)
    }

    /// Number of generator rows.
    pub fn num_generators(&self) -> usize {
        self.r.len()
    }

    /// Check shape consistency and value ranges.
    pub fn validate(&self) -> IrResult<()> {
        let rows = self.r.len();
        if self.x.len() != rows || self.z.len() != rows {
            return Err(IrError::InvalidTableau(format!(
                "row counts differ: x={}, z={}, r={}",
                self.x.len(),
                self.z.len(),
                rows
            )));
        }
        let width = self.num_qubits();
        for (i, (x_row, z_row)) in self.x.iter().zip(&self.z).enumerate() {
            if x_row.len() != width || z_row.len() != width {
                return Err(IrError::InvalidTableau(format!(
                    "row {i} has width x={}, z={}, expected {width}",
                    x_row.len(),
                    z_row.len()
                )));
            }
            if x_row.iter().chain(z_row).any(|&bit| bit > 1) {
                return Err(IrError::InvalidTableau(format!("row {i} contains a non-bit entry")));
            }
        }
        if let Some(&bad) = self.r.iter().find(|&&r| r > 3) {
            return Err(IrError::InvalidTableau(format!("phase code {bad} out of range")));
        }
        Ok(())
    }

    /// Render generator `row` as a signed Pauli string, e.g. `"-iXZY"`.
    pub fn generator(&self, row: usize) -> Option<String> {
        let phase = Phase::from_code(*self.r.get(row)?)?;
        let x_row = self.x.get(row)?;
        let z_row = self.z.get(row)?;
        let mut out = String::from(phase.symbol());
        for (&x, &z) in x_row.iter().zip(z_row) {
            out.push(Pauli::from_bits(x, z)?.as_char());
        }
        Some(out)
    }

    /// Render every generator. Malformed rows render as `"?"`.
    pub fn generators(&self) -> Vec<String> {
        (0..self.num_generators())
            .map(|row| self.generator(row).unwrap_or_else(|| "?".to_string()))
            .collect()
    }
}
