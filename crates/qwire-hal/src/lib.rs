//! qwire Engine Client
//!
//! This crate sends compiled circuits to a simulation engine and checks
//! what comes back.
//!
//! # Overview
//!
//! - [`SimulationEngine`]: async trait for the three engine calls
//! - [`HttpEngine`]: `reqwest` implementation against a JSON HTTP engine
//! - [`ProbabilityResult`], [`StabilizerEvolution`], [`QecResult`]: response
//!   types with shape checks
//!
//! # Example
//!
//! ```ignore
//! use qwire_compile::{compile, EndpointMode};
//! use qwire_hal::{HttpEngine, SimulationEngine};
//!
//! let compiled = compile(&graph, EndpointMode::Circuit)?;
//! let engine = HttpEngine::with_base_url("http://127.0.0.1:3000")?;
//! let result = engine.simulate_circuit(&compiled.to_circuit_request()).await?;
//! for (label, p) in result.labeled() {
//!     println!("{label}: {p:.3}");
//! }
//! ```

pub mod engine;
pub mod error;
pub mod http;
pub mod qec;
pub mod result;

pub use engine::{EngineConfig, SimulationEngine};
pub use error::{HalError, HalResult};
pub use http::HttpEngine;
pub use qec::{
    PauliError, PauliKind, QecCode, QecOutcome, QecRequest, QecResult, QecSnapshot, Recovery,
};
pub use result::{PROBABILITY_TOLERANCE, ProbabilityResult, StabilizerEvolution};
