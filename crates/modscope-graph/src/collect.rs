//! Intermediate reference types produced while scanning a module.
//!
//! These sit between the raw AST and the final wire records: the scanner
//! (`scan_module`) populates them, the compiler driver attaches them to graph
//! modules, and `extract` maps them into [`DependencyRecord`]s.
//!
//! [`DependencyRecord`]: crate::records::DependencyRecord

use crate::records::Span;

/// Semantic classification of a reference edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `import ... from "x"` or bare `import "x"`.
    Import,
    /// `export { a } from "x"`.
    ReExport,
    /// `export * from "x"`.
    ExportAll,
    /// The request nested inside a dynamic `import("x")`.
    DynamicImport,
}

impl ReferenceKind {
    /// Stable kind string used on the wire for executable references.
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Import => "import",
            ReferenceKind::ReExport => "re-export",
            ReferenceKind::ExportAll => "export-all",
            ReferenceKind::DynamicImport => "dynamic-import",
        }
    }

    /// Stable kind string used on the wire for type-only references.
    pub fn type_only_str(self) -> &'static str {
        match self {
            ReferenceKind::Import => "type-only import",
            ReferenceKind::ReExport => "type-only re-export",
            ReferenceKind::ExportAll => "type-only export-all",
            ReferenceKind::DynamicImport => "dynamic-import",
        }
    }
}

/// One reference edge collected from the entry module source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedReference {
    pub kind: ReferenceKind,
    /// Module specifier the edge points at. Never resolved; all non-entry
    /// specifiers are opaque externals.
    pub specifier: String,
    /// Named bindings referenced through this edge, in source order.
    pub identifiers: Vec<String>,
    /// Statement-level type-only marker (`import type`, `export type`).
    pub type_only: bool,
    pub span: Option<Span>,
}

/// One dynamic `import()` boundary with the requests made inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedAsyncBlock {
    pub span: Option<Span>,
    pub requests: Vec<CollectedReference>,
}
