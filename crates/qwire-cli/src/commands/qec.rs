//! QEC command implementation.

use anyhow::Result;
use console::style;
use tracing::error;

use qwire_hal::{PauliError, QecCode, QecOutcome, QecRequest, QecSnapshot, SimulationEngine};

use super::common::{connect, print_tableau};
use crate::config::Config;

/// Execute the qec command: inject errors into a code and show the
/// correction cycle.
pub async fn execute(code: QecCode, errors: &[PauliError], config: &Config) -> Result<()> {
    println!(
        "{} {} ({})",
        style("→").cyan().bold(),
        style(code).green(),
        code.description()
    );

    let mut request = QecRequest::new(code);
    for err in errors {
        request = request.with_error(err.kind, err.qubit);
        println!("  Inject: {}", style(err).yellow());
    }
    request.validate()?;

    let engine = connect(config)?;
    let result = engine
        .correct_errors(&request)
        .await
        .inspect_err(|e| error!("Error correction failed: {}", e))?;

    print_snapshot("Initial state", &result.initial);
    print_snapshot("After errors", &result.after_errors);

    if let Some(recovery) = &result.recovery {
        println!(
            "\n  Recovery: apply {} on qubit {}",
            style(recovery.kind).yellow(),
            recovery.qubit
        );
    }
    if let Some(after) = &result.after_recovery {
        print_snapshot("After recovery", after);
    }

    match result.outcome() {
        QecOutcome::NoError => println!("\n{} No error detected", style("✓").green().bold()),
        QecOutcome::Corrected => println!("\n{} Error corrected", style("✓").green().bold()),
        QecOutcome::Uncorrectable => println!(
            "\n{} Error cannot be corrected",
            style("✗").red().bold()
        ),
    }

    Ok(())
}

fn print_snapshot(title: &str, snapshot: &QecSnapshot) {
    let syndrome: String = snapshot.syndrome.iter().map(ToString::to_string).collect();
    println!(
        "\n  {}: syndrome {}",
        title,
        if snapshot.is_clean() {
            style(syndrome).green()
        } else {
            style(syndrome).red()
        }
    );
    print_tableau("    ", &snapshot.tableau);
}
