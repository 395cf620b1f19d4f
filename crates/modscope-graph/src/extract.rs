//! Pure extraction: resolved module graph to wire records.
//!
//! Extraction copies out only the stable contract fields (kind, category,
//! identifiers, span); everything else the driver knows about a module is
//! discarded here.

use crate::collect::{CollectedAsyncBlock, CollectedReference};
use crate::module::{Module, ModuleGraph};
use crate::records::{AsyncBlockRecord, DependencyRecord, ExtractionResult};

/// Coarse classification attached to executable references.
const CATEGORY_ESM: &str = "esm";

/// Kind string for an async boundary block.
const KIND_ASYNC_BLOCK: &str = "import()";

/// Extract records for the entry module located by identifier fragment.
///
/// When no module matches, the result stays at its empty default. The
/// original pipeline behaved the same way and downstream consumers rely on
/// an empty-but-successful result here, so this is pinned rather than
/// turned into an error.
pub fn extract_entry(graph: &ModuleGraph, entry_fragment: &str) -> ExtractionResult {
    graph
        .find_by_identifier(entry_fragment)
        .map(extract_module)
        .unwrap_or_default()
}

/// Extract records from one resolved module.
pub fn extract_module(module: &Module) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    for reference in &module.references {
        if reference.type_only {
            result
                .presentational_dependencies
                .push(presentational_record(reference));
        } else {
            result.dependencies.push(dependency_record(reference));
        }
    }

    for (index, block) in module.async_blocks.iter().enumerate() {
        result.async_blocks.push(async_block_record(index, block));
    }

    result
}

fn dependency_record(reference: &CollectedReference) -> DependencyRecord {
    DependencyRecord {
        kind: reference.kind.as_str().to_string(),
        category: Some(CATEGORY_ESM.to_string()),
        identifiers: reference.identifiers.clone(),
        span: reference.span,
    }
}

fn presentational_record(reference: &CollectedReference) -> DependencyRecord {
    DependencyRecord {
        kind: reference.kind.type_only_str().to_string(),
        category: None,
        identifiers: reference.identifiers.clone(),
        span: reference.span,
    }
}

fn async_block_record(index: usize, block: &CollectedAsyncBlock) -> AsyncBlockRecord {
    AsyncBlockRecord {
        id: format!("chunk-{index}"),
        kind: KIND_ASYNC_BLOCK.to_string(),
        span: block.span,
        dependencies: block.requests.iter().map(dependency_record).collect(),
    }
}
