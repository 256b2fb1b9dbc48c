//! CLI command implementations.

pub mod common;
pub mod compile;
pub mod evolve;
pub mod qec;
pub mod run;
pub mod version;
