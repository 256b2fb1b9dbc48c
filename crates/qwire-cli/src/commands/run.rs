//! Run command implementation.

use anyhow::Result;
use console::style;
use tracing::error;

use qwire_compile::{Compiler, EndpointMode};
use qwire_hal::SimulationEngine;

use super::common::{connect, load_graph, print_compiled, print_probabilities};
use crate::config::Config;

/// Execute the run command: compile for the circuit endpoint and simulate.
pub async fn execute(input: &str, config: &Config) -> Result<()> {
    println!(
        "{} Simulating {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let graph = load_graph(input)?;
    let compiled = Compiler::new(EndpointMode::Circuit).compile(&graph)?;
    print_compiled(&compiled);

    let engine = connect(config)?;
    let result = engine
        .simulate_circuit(&compiled.to_circuit_request())
        .await
        .inspect_err(|e| error!("Circuit simulation failed: {}", e))?;

    print_probabilities(&result);
    Ok(())
}
