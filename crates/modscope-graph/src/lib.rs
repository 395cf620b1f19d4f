//! # modscope-graph
//!
//! Foundation crate for modscope: the dependency record model, source span
//! handling, and the pure extraction that turns a resolved entry module into
//! an [`ExtractionResult`].
//!
//! This crate performs no I/O. The compiler driver (`modscope-analyzer`)
//! feeds it source text and reads back structured records; everything here
//! is deterministic and synchronous.
//!
//! ## Quick Start
//!
//! ```
//! use modscope_graph::{ParseOptions, scan_module};
//!
//! let scanned = scan_module(r#"import { a, b } from "x";"#, ParseOptions::infer(r#"import { a, b } from "x";"#))?;
//! assert_eq!(scanned.references.len(), 1);
//! # Ok::<(), modscope_graph::Error>(())
//! ```

pub mod collect;
pub mod extract;
pub mod module;
pub mod records;
pub mod span;

mod parse;

pub use collect::{CollectedAsyncBlock, CollectedReference, ReferenceKind};
pub use extract::{extract_entry, extract_module};
pub use module::{Module, ModuleGraph, ModuleId, ModuleKind};
pub use parse::{ParseOptions, ScannedModule, scan_module};
pub use records::{AsyncBlockRecord, DependencyRecord, ExtractionResult, Position, Span};
pub use span::LineIndex;

/// Errors produced while scanning module source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source text could not be parsed as a module.
    #[error("Failed to parse module: {0}")]
    Parse(String),
}

/// Result type alias for modscope-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
