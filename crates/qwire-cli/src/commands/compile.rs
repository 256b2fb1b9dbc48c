//! Compile command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use qwire_compile::{Compiler, EndpointMode};

use super::common::{load_graph, parse_tableau, print_compiled};

/// Execute the compile command.
///
/// Writes the engine request for `mode` to `output`, or next to the input
/// as `<stem>_request.json`.
pub fn execute(
    input: &str,
    output: Option<&str>,
    mode: EndpointMode,
    tableau: &[String],
) -> Result<()> {
    println!(
        "{} Compiling {} for the {} endpoint",
        style("→").cyan().bold(),
        style(input).green(),
        style(mode).yellow()
    );

    let graph = load_graph(input)?;
    println!(
        "  Loaded: {} nodes, {} wires, {} qubits",
        graph.nodes().len(),
        graph.edges().len(),
        graph.num_qubit_sources()
    );

    let compiled = Compiler::new(mode).compile(&graph)?;
    println!("{} Compilation complete", style("✓").green().bold());
    print_compiled(&compiled);

    let body = match mode {
        EndpointMode::Circuit => {
            if !tableau.is_empty() {
                anyhow::bail!("--tableau only applies to stabilizer mode");
            }
            serde_json::to_string_pretty(&compiled.to_circuit_request())?
        }
        EndpointMode::Stabilizer => {
            let initial = parse_tableau(tableau)?;
            serde_json::to_string_pretty(&compiled.to_stabilizer_request(initial)?)?
        }
    };

    let output_path = output.map_or_else(|| default_output(input), PathBuf::from);
    fs::write(&output_path, body)
        .with_context(|| format!("Failed to write file: {}", output_path.display()))?;
    println!("  Output: {}", style(output_path.display()).green());

    Ok(())
}

/// Default output path: the input's stem with `_request.json`.
fn default_output(input: &str) -> PathBuf {
    let p = Path::new(input);
    let stem = p.file_stem().unwrap_or_default().to_string_lossy();
    p.with_file_name(format!("{stem}_request.json"))
}
