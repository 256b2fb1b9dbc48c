//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qwire_compile::{CompiledCircuit, OperationSpec};
use qwire_hal::{HttpEngine, ProbabilityResult};
use qwire_ir::{CircuitGraph, Tableau};

use crate::config::Config;

/// Most basis states listed by [`print_probabilities`].
const MAX_LISTED_STATES: usize = 16;

/// Load a circuit graph from an editor JSON export.
pub fn load_graph(path: &str) -> Result<CircuitGraph> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    CircuitGraph::from_json(&source).with_context(|| format!("Failed to parse graph: {path}"))
}

/// Parse an initial tableau from signed Pauli strings; none given means none.
pub fn parse_tableau(generators: &[String]) -> Result<Option<Tableau>> {
    if generators.is_empty() {
        return Ok(None);
    }
    let tableau = Tableau::from_generators(generators).context("Invalid initial tableau")?;
    Ok(Some(tableau))
}

/// Create the engine client from the loaded configuration.
pub fn connect(config: &Config) -> Result<HttpEngine> {
    let engine_config = config.engine_config();
    println!("  Engine: {}", style(&engine_config.base_url).yellow());
    HttpEngine::new(engine_config).context("Failed to create engine client")
}

/// Render an operation as `name q0, q1`.
pub fn format_operation(op: &OperationSpec) -> String {
    let inputs: Vec<String> = op.inputs.iter().map(ToString::to_string).collect();
    format!("{} {}", op.operation, inputs.join(", "))
}

/// Print the qubit lines and operation list of a compiled circuit.
pub fn print_compiled(compiled: &CompiledCircuit) {
    println!(
        "  Compiled: {} qubits, {} gates, {} operations ({} mode)",
        compiled.num_qubits(),
        compiled.gate_count(),
        compiled.operations.len(),
        compiled.mode
    );
    for qubit in &compiled.qubits {
        println!(
            "    {} {} = {}",
            style(qubit.index).cyan(),
            qubit.id,
            qubit.value
        );
    }
    for (i, op) in compiled.operations.iter().enumerate() {
        println!("    {:>3}: {}", i, format_operation(op));
    }
}

/// Print basis-state probabilities as bars.
pub fn print_probabilities(result: &ProbabilityResult) {
    println!(
        "\n{} Probabilities ({} qubits):",
        style("✓").green().bold(),
        result.num_qubits()
    );

    let nonzero: Vec<(String, f64)> = result.labeled().filter(|(_, p)| *p > 0.0).collect();

    for (label, p) in nonzero.iter().take(MAX_LISTED_STATES) {
        let percent = p * 100.0;
        let bar_len = (percent / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>7.3}% {}",
            style(label).cyan(),
            percent,
            style(bar).green()
        );
    }

    if nonzero.len() > MAX_LISTED_STATES {
        println!(
            "  ... and {} more states",
            nonzero.len() - MAX_LISTED_STATES
        );
    }

    if let Some((index, p)) = result.most_likely() {
        println!(
            "\n  Most likely: {} ({:.3})",
            style(result.basis_label(index)).yellow(),
            p
        );
    }
}

/// Print the generators of a tableau, one per line.
pub fn print_tableau(indent: &str, tableau: &Tableau) {
    if tableau.num_generators() == 0 {
        println!("{indent}{}", style("(empty)").dim());
        return;
    }
    for generator in tableau.generators() {
        println!("{indent}{}", style(generator).cyan());
    }
}
