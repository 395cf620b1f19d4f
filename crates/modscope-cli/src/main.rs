//! modscope CLI - analyze a module snippet's dependency graph from a
//! sandboxed analysis run.
//!
//! Handles argument parsing, logging initialization, and command dispatch.

use clap::Parser;
use miette::Result;
use modscope_cli::{cli, commands, error, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args).await,
        cli::Command::Snapshot(snapshot_args) => commands::snapshot_execute(snapshot_args),
        cli::Command::Inspect(inspect_args) => commands::inspect_execute(inspect_args),
    };

    result.map_err(error::cli_error_to_miette)
}
