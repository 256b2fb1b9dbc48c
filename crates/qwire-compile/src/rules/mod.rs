//! Built-in validation rules.
//!
//! [`StructuralValidator::standard`](crate::StructuralValidator::standard)
//! runs them in this order:
//!
//! 1. [`QubitPresence`]
//! 2. [`MeasurementParity`]
//! 3. [`QubitFanOut`]
//! 4. [`GateDegree`]
//! 5. [`MeasurementFanIn`]
//! 6. [`NoOrphanGates`]
//! 7. [`WireEndpoints`]
//! 8. [`TerminalDirection`]
//! 9. [`HandleAssignment`]

mod counts;
mod degree;
mod wiring;

pub use counts::{MeasurementParity, QubitPresence};
pub use degree::{GateDegree, MeasurementFanIn, NoOrphanGates, QubitFanOut};
pub use wiring::{HandleAssignment, TerminalDirection, WireEndpoints};
