//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect the dependency graph a module snippet would produce when bundled.
#[derive(Debug, Parser)]
#[command(name = "modscope", version, about)]
pub struct Cli {
    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a module snippet inside the sandbox
    Analyze(AnalyzeArgs),
    /// Pack a directory tree into a mountable filesystem image
    Snapshot(SnapshotArgs),
    /// Look up the record at a position in a saved extraction result
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Source file to analyze, or `-` for stdin
    pub input: PathBuf,

    /// Filesystem image to mount into the sandbox
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Analysis program spawned inside the sandbox
    /// (default: modscope-analyze next to this executable)
    #[arg(long)]
    pub analyzer: Option<PathBuf>,

    /// Print the raw extraction result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also resolve the record containing LINE:COL (1-based)
    #[arg(long, value_name = "LINE:COL")]
    pub at: Option<String>,
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Directory tree to pack
    pub dir: PathBuf,

    /// Where to write the packed image
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Extraction result JSON file (as printed by `analyze --json`)
    pub result: PathBuf,

    /// Position to look up, as LINE:COL (1-based)
    #[arg(long, value_name = "LINE:COL")]
    pub at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_parses_position_flag() {
        let cli = Cli::parse_from(["modscope", "analyze", "-", "--at", "3:7", "--json"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.at.as_deref(), Some("3:7"));
                assert!(args.json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn snapshot_requires_output() {
        assert!(Cli::try_parse_from(["modscope", "snapshot", "dir"]).is_err());
    }
}
