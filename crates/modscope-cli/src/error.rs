//! Error handling for the modscope CLI.
//!
//! Commands return [`CliError`]; `main` converts it into a miette report
//! for rendering. Compile failure detail is carried verbatim: the text the
//! analysis process produced is what the user sees.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum CliError {
    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(modscope::invalid_argument))]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    #[diagnostic(code(modscope::file_not_found))]
    FileNotFound(PathBuf),

    /// The compile-and-analyze run failed; detail preserved unmodified
    #[error("{0}")]
    #[diagnostic(code(modscope::compile_failed))]
    Compile(String),

    /// Sandbox lifecycle errors
    #[error(transparent)]
    #[diagnostic(code(modscope::sandbox))]
    Sandbox(#[from] modscope_sandbox::SandboxError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    #[diagnostic(code(modscope::io))]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    #[diagnostic(code(modscope::json))]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a CLI error into a miette report for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    miette::Report::new(err)
}
