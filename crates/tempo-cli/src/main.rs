// crates/tempo-cli/src/main.rs
//
// CLI entrypoint for the Tempo operator tools.
//
// Reads module state straight from a node's data directory (read-only, safe
// next to a running daemon), validates parameter files before they are
// proposed, and runs offline issuance simulations.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::simulate::SimulateCmd;
use commands::validate::ValidateCmd;
use output::OutputFormat;

/// Tempo CLI: inspect and simulate time-based inflation.
#[derive(Parser, Debug)]
#[command(
    name = "tempo",
    version = "0.1.0",
    about = "Tempo CLI: inspect and simulate time-based token issuance"
)]
struct Cli {
    /// Node data directory (the daemon's `data_dir`).
    #[arg(long, global = true, default_value = "~/.tempo/data")]
    data_dir: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the current inflation parameters.
    Params,

    /// Show the last observed inflation rate and block time.
    LastBlock,

    /// Validate a params or genesis JSON file.
    Validate(ValidateCmd),

    /// Run an offline issuance simulation with default params.
    Simulate(SimulateCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let format = OutputFormat::from_json_flag(cli.json);

    match &cli.command {
        Commands::Params => commands::query::run_params(&cli.data_dir, format)?,
        Commands::LastBlock => commands::query::run_last_block(&cli.data_dir, format)?,
        Commands::Validate(cmd) => commands::validate::run(cmd, format)?,
        Commands::Simulate(cmd) => commands::simulate::run(cmd, format)?,
    }

    Ok(())
}
