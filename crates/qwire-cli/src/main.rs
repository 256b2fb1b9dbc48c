//! qwire Command-Line Interface
//!
//! Compiles node-and-wire circuit graphs exported by the visual editor and
//! sends them to a simulation engine.
//!
//! ```text
//!   q0 ──[H]──●──[M]
//!             │
//!   q1 ───────⊕──[M]
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qwire_compile::EndpointMode;
use qwire_hal::{PauliError, QecCode};

mod commands;
mod config;

use commands::{compile, evolve, qec, run, version};
use config::Config;

/// qwire - compile visual quantum circuit graphs for a simulation engine
#[derive(Parser)]
#[command(name = "qwire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ~/.qwire/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Engine base URL, overriding the configuration
    #[arg(long, global = true)]
    engine: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a circuit graph into an engine request
    Compile {
        /// Input file (editor JSON export)
        #[arg(short, long)]
        input: String,

        /// Output file for the request body
        #[arg(short, long)]
        output: Option<String>,

        /// Endpoint mode (circuit, stabilizer)
        #[arg(short, long)]
        mode: Option<EndpointMode>,

        /// Initial tableau generator, e.g. "+XZ" (stabilizer mode, repeatable)
        #[arg(short, long)]
        tableau: Vec<String>,
    },

    /// Compile a circuit graph and simulate it
    Run {
        /// Input file (editor JSON export)
        #[arg(short, long)]
        input: String,
    },

    /// Compile a circuit graph and evolve a stabilizer state through it
    Evolve {
        /// Input file (editor JSON export)
        #[arg(short, long)]
        input: String,

        /// Initial tableau generator, e.g. "+XZ" (repeatable)
        #[arg(short, long)]
        tableau: Vec<String>,
    },

    /// Run an error correction cycle
    Qec {
        /// Code (bit_flip, phase_flip, steane)
        #[arg(long, default_value = "bit_flip")]
        code: QecCode,

        /// Error to inject as KIND:QUBIT, e.g. X:1 (repeatable)
        #[arg(short, long)]
        error: Vec<PauliError>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).map(|mut config| {
        if let Some(url) = &cli.engine {
            config.engine.url.clone_from(url);
        }
        config
    });

    // Setup logging
    let filter = match cli.verbose {
        0 => config
            .as_ref()
            .map_or("warn", |config| config.logging.level.as_str()),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match config {
        Err(e) => Err(e.into()),
        Ok(config) => match cli.command {
            Commands::Compile {
                input,
                output,
                mode,
                tableau,
            } => {
                let mode = mode.unwrap_or(config.compile.mode);
                compile::execute(&input, output.as_deref(), mode, &tableau)
            }

            Commands::Run { input } => run::execute(&input, &config).await,

            Commands::Evolve { input, tableau } => {
                evolve::execute(&input, &tableau, &config).await
            }

            Commands::Qec { code, error } => qec::execute(code, &error, &config).await,

            Commands::Version => {
                version::execute();
                Ok(())
            }
        },
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
