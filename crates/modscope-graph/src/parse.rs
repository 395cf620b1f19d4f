//! Module scanning: OXC parse plus reference collection.
//!
//! `scan_module` parses the source once and walks it twice: the top-level
//! statement walk collects static and presentational edges, and an AST
//! visitor collects dynamic `import()` boundaries wherever they appear in
//! expression position.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Expression, ImportDeclarationSpecifier, ModuleDeclaration, ModuleExportName, Program,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

use crate::collect::{CollectedAsyncBlock, CollectedReference, ReferenceKind};
use crate::records::Span;
use crate::span::LineIndex;
use crate::{Error, Result};

/// Parse options for scanning source code.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub source_type: SourceType,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::mjs(),
        }
    }
}

impl ParseOptions {
    pub fn typescript() -> Self {
        Self {
            source_type: SourceType::ts(),
        }
    }

    pub fn jsx() -> Self {
        Self {
            source_type: SourceType::jsx(),
        }
    }

    pub fn tsx() -> Self {
        Self {
            source_type: SourceType::tsx(),
        }
    }

    /// Infer the source type from code patterns. Snippets carry no file
    /// extension, so TypeScript has to be sniffed from its surface syntax.
    pub fn infer(code: &str) -> Self {
        let looks_typescript = code.contains("import type")
            || code.contains("export type")
            || code.contains("interface ")
            || code.contains(": ");
        if looks_typescript {
            Self::tsx()
        } else {
            Self::jsx()
        }
    }
}

/// Everything collected from one module source.
#[derive(Debug, Default)]
pub struct ScannedModule {
    pub references: Vec<CollectedReference>,
    pub async_blocks: Vec<CollectedAsyncBlock>,
}

/// Scan a module: parse it and collect its reference edges and async
/// boundaries, each with a span from the shared line index.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the source has syntax errors. Callers decide
/// whether that aborts the whole compilation (it does, for the entry module).
pub fn scan_module(code: &str, options: ParseOptions) -> Result<ScannedModule> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, options.source_type).parse();

    if !parsed.errors.is_empty() {
        let detail = parsed
            .errors
            .iter()
            .map(|err| format!("{:?}", err))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(Error::Parse(detail));
    }

    let line_index = LineIndex::new(code);
    let mut scanned = ScannedModule::default();

    collect_static_references(&parsed.program, code, &line_index, &mut scanned.references);

    let mut collector = DynamicImportCollector {
        source_text: code,
        line_index: &line_index,
        blocks: Vec::new(),
    };
    collector.visit_program(&parsed.program);
    scanned.async_blocks = collector.blocks;

    Ok(scanned)
}

fn to_span(span: oxc_span::Span, source: &str, index: &LineIndex) -> Span {
    Span::new(
        index.position(span.start, source),
        index.position(span.end, source),
    )
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

fn collect_static_references(
    program: &Program<'_>,
    source: &str,
    index: &LineIndex,
    references: &mut Vec<CollectedReference>,
) {
    for stmt in program.body.iter() {
        let Some(module_decl) = stmt.as_module_declaration() else {
            continue;
        };

        match module_decl {
            ModuleDeclaration::ImportDeclaration(import) => {
                let mut identifiers = Vec::new();
                if let Some(specs) = &import.specifiers {
                    for spec in specs {
                        match spec {
                            ImportDeclarationSpecifier::ImportSpecifier(named) => {
                                identifiers.push(export_name(&named.imported));
                            }
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => {
                                identifiers.push("default".to_string());
                            }
                            // Namespace imports reference the whole module
                            // object, not individual bindings.
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => {}
                        }
                    }
                }

                references.push(CollectedReference {
                    kind: ReferenceKind::Import,
                    specifier: import.source.value.to_string(),
                    identifiers,
                    type_only: import.import_kind.is_type(),
                    span: Some(to_span(import.span, source, index)),
                });
            }
            ModuleDeclaration::ExportNamedDeclaration(named) => {
                // Only re-exports produce an edge; local exports reference no
                // other module.
                let Some(src) = &named.source else { continue };

                let identifiers = named
                    .specifiers
                    .iter()
                    .map(|spec| export_name(&spec.exported))
                    .collect();

                references.push(CollectedReference {
                    kind: ReferenceKind::ReExport,
                    specifier: src.value.to_string(),
                    identifiers,
                    type_only: named.export_kind.is_type(),
                    span: Some(to_span(named.span, source, index)),
                });
            }
            ModuleDeclaration::ExportAllDeclaration(all) => {
                references.push(CollectedReference {
                    kind: ReferenceKind::ExportAll,
                    specifier: all.source.value.to_string(),
                    identifiers: all.exported.as_ref().map(export_name).into_iter().collect(),
                    type_only: all.export_kind.is_type(),
                    span: Some(to_span(all.span, source, index)),
                });
            }
            _ => {}
        }
    }
}

/// AST visitor that collects dynamic `import()` expressions.
struct DynamicImportCollector<'a> {
    source_text: &'a str,
    line_index: &'a LineIndex,
    blocks: Vec<CollectedAsyncBlock>,
}

impl<'a, 'ast> Visit<'ast> for DynamicImportCollector<'a> {
    fn visit_import_expression(&mut self, expr: &oxc_ast::ast::ImportExpression<'ast>) {
        let block_span = to_span(expr.span(), self.source_text, self.line_index);

        // Only literal specifiers produce a nested request; a computed
        // argument still marks an async boundary with no known target.
        let requests = match &expr.source {
            Expression::StringLiteral(lit) => vec![CollectedReference {
                kind: ReferenceKind::DynamicImport,
                specifier: lit.value.to_string(),
                identifiers: Vec::new(),
                type_only: false,
                span: Some(to_span(lit.span, self.source_text, self.line_index)),
            }],
            _ => Vec::new(),
        };

        self.blocks.push(CollectedAsyncBlock {
            span: Some(block_span),
            requests,
        });

        walk::walk_import_expression(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_rejects_syntax_errors() {
        let err = scan_module("import {", ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn plain_script_scans_empty() {
        let scanned = scan_module("const x = 1;", ParseOptions::default()).unwrap();
        assert!(scanned.references.is_empty());
        assert!(scanned.async_blocks.is_empty());
    }

    #[test]
    fn local_exports_produce_no_edges() {
        let scanned =
            scan_module("export const a = 1;", ParseOptions::infer("export const a = 1;")).unwrap();
        assert!(scanned.references.is_empty());
    }
}
