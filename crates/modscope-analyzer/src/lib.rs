//! # modscope-analyzer
//!
//! The analysis compiler driver. It configures a compilation the way a
//! bundler would (fixed entry, externals short-circuited, optimizations
//! that would merge reference identity disabled), builds the module graph,
//! and runs registered plugins against it. The stock [`ExtractionPlugin`]
//! suppresses emission entirely and captures an
//! [`ExtractionResult`](modscope_graph::ExtractionResult) instead.
//!
//! The `modscope-analyze` binary in this crate is the process the sandbox
//! spawns: it reads the entry module from a fixed path under its working
//! directory and writes exactly one JSON document to stdout on success.
//!
//! ```no_run
//! use modscope_analyzer::{Compiler, CompilerOptions, ExtractionPlugin};
//!
//! let options = CompilerOptions::new("src/index.js");
//! let plugin = ExtractionPlugin::for_options(&options);
//! let mut compiler = Compiler::new(options);
//! compiler.register(Box::new(plugin.clone()));
//! compiler.run()?;
//! let result = plugin.take_result();
//! # Ok::<(), modscope_analyzer::Error>(())
//! ```

pub mod compiler;
pub mod options;
pub mod plugin;

pub use compiler::{Compilation, Compiler};
pub use options::{CompilerOptions, ExternalsPolicy};
pub use plugin::{AnalyzerPlugin, ExtractionPlugin};

use std::path::PathBuf;

/// Errors produced by the analysis compiler driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The entry module could not be read.
    #[error("Failed to read entry module {}: {source}", .path.display())]
    EntryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entry module failed to parse.
    #[error("Entry module failed to compile:\n{0}")]
    Compile(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Emission failed.
    #[error("Failed to emit output: {0}")]
    Emit(#[from] std::io::Error),
}

/// Result type alias for modscope-analyzer operations.
pub type Result<T> = std::result::Result<T, Error>;
