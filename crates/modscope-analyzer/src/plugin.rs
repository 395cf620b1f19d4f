//! Plugin extension point for the analysis compiler.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;

use modscope_graph::{ExtractionResult, ModuleGraph, extract_entry};

use crate::compiler::Compilation;
use crate::options::CompilerOptions;

/// Capability interface plugins implement against the compiler driver.
///
/// Hooks fire in registration order. `modules_resolved` runs once per
/// compilation after the graph is fully built; `should_emit` is consulted
/// afterwards, and a single `false` suppresses emission for the whole run.
pub trait AnalyzerPlugin: Send + Sync {
    fn name(&self) -> Cow<'static, str>;

    fn modules_resolved(&self, _graph: &ModuleGraph) {}

    fn should_emit(&self, _compilation: &Compilation) -> bool {
        true
    }
}

/// Plugin that captures dependency records for the entry module and prevents
/// any bundle from being emitted. This turns a build into a pure analysis
/// run.
#[derive(Clone)]
pub struct ExtractionPlugin {
    entry_fragment: String,
    state: Arc<Mutex<ExtractionResult>>,
}

impl ExtractionPlugin {
    pub fn new(entry_fragment: impl Into<String>) -> Self {
        Self {
            entry_fragment: entry_fragment.into(),
            state: Arc::new(Mutex::new(ExtractionResult::default())),
        }
    }

    pub fn for_options(options: &CompilerOptions) -> Self {
        Self::new(options.entry_fragment())
    }

    /// Take the captured result, leaving the empty default behind.
    pub fn take_result(&self) -> ExtractionResult {
        std::mem::take(&mut *self.state.lock())
    }
}

impl AnalyzerPlugin for ExtractionPlugin {
    fn name(&self) -> Cow<'static, str> {
        "extraction-plugin".into()
    }

    fn modules_resolved(&self, graph: &ModuleGraph) {
        // When the entry cannot be located the state keeps its empty
        // default; the run still reports success.
        let result = extract_entry(graph, &self.entry_fragment);
        tracing::debug!(
            dependencies = result.dependencies.len(),
            presentational = result.presentational_dependencies.len(),
            async_blocks = result.async_blocks.len(),
            "extraction captured entry records"
        );
        *self.state.lock() = result;
    }

    fn should_emit(&self, _compilation: &Compilation) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modscope_graph::{Module, ModuleId};

    #[test]
    fn take_result_resets_state() {
        let plugin = ExtractionPlugin::new("src/index.js");

        let mut graph = ModuleGraph::new();
        graph.add_module(Module::entry(ModuleId::new("src/index.js")));
        plugin.modules_resolved(&graph);

        let first = plugin.take_result();
        assert!(first.is_empty());
        let second = plugin.take_result();
        assert_eq!(first, second);
    }
}
