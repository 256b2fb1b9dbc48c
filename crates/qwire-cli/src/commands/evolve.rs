//! Evolve command implementation.

use anyhow::Result;
use console::style;
use tracing::error;

use qwire_compile::{Compiler, EndpointMode};
use qwire_hal::SimulationEngine;

use super::common::{
    connect, format_operation, load_graph, parse_tableau, print_compiled, print_tableau,
};
use crate::config::Config;

/// Execute the evolve command: compile for the stabilizer endpoint and print
/// the tableau after every operation.
pub async fn execute(input: &str, tableau: &[String], config: &Config) -> Result<()> {
    println!(
        "{} Evolving {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let graph = load_graph(input)?;
    let compiled = Compiler::new(EndpointMode::Stabilizer).compile(&graph)?;
    print_compiled(&compiled);

    let request = compiled.to_stabilizer_request(parse_tableau(tableau)?)?;
    if let Some(initial) = &request.initial_tableau {
        println!("\n  Initial state:");
        print_tableau("    ", initial);
    }

    let engine = connect(config)?;
    let evolution = engine
        .evolve_stabilizer(&request)
        .await
        .inspect_err(|e| error!("Stabilizer evolution failed: {}", e))?;

    println!(
        "\n{} Evolution ({} steps):",
        style("✓").green().bold(),
        evolution.len()
    );
    for (step, state) in evolution.evolution.iter().enumerate() {
        let label = request
            .operations
            .get(step)
            .map_or_else(|| "?".to_string(), format_operation);
        println!("  Step {}: {}", step + 1, style(label).yellow());
        print_tableau("    ", state);
    }

    Ok(())
}
