//! Command-line interface for the archive and config tools

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "jagkit")]
#[command(about = "jagkit: cache archive and config codec tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Parse arguments and dispatch to the selected subcommand.
pub fn run_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    Cli::parse().command.execute()
}
