//! apidiff CLI
//!
//! Command-line interface for comparing API snapshots

use apidiff_core::logging_facility::{init, Profile};
use apidiff_core_types::RunId;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "apidiff")]
#[command(about = "apidiff - Compare two snapshots of a library API", long_about = None)]
struct Cli {
    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare an old and a new snapshot
    Compare(commands::compare::CompareArgs),
    /// Check that snapshot files load
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let run_id = RunId::new();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
