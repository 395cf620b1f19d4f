//! The analysis compiler driver.
//!
//! Drives one compilation the way a bundler would, minus everything the
//! analysis does not need: the entry module is parsed, every other request
//! is short-circuited into an external stub, plugins observe the resolved
//! graph, and emission only happens if no plugin vetoes it.

use std::fs;

use modscope_graph::{Module, ModuleGraph, ModuleId, ParseOptions, scan_module};

use crate::options::CompilerOptions;
use crate::plugin::AnalyzerPlugin;
use crate::{Error, Result};

/// One finished compilation: the resolved graph plus the entry source that
/// produced it.
#[derive(Debug)]
pub struct Compilation {
    pub graph: ModuleGraph,
    pub entry_source: String,
}

/// Analysis compiler. Register plugins, then run.
pub struct Compiler {
    options: CompilerOptions,
    plugins: Vec<Box<dyn AnalyzerPlugin>>,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            plugins: Vec::new(),
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn register(&mut self, plugin: Box<dyn AnalyzerPlugin>) {
        self.plugins.push(plugin);
    }

    /// Read the entry module from disk and compile it.
    pub fn run(&self) -> Result<Compilation> {
        let source = fs::read_to_string(&self.options.entry).map_err(|source| Error::EntryRead {
            path: self.options.entry.clone(),
            source,
        })?;
        self.compile_source(&source)
    }

    /// Compile from already-loaded entry source.
    pub fn compile_source(&self, source: &str) -> Result<Compilation> {
        self.validate_options()?;

        tracing::debug!(entry = %self.options.entry.display(), "starting analysis compilation");

        let scanned = scan_module(source, ParseOptions::infer(source))
            .map_err(|err| Error::Compile(err.to_string()))?;

        let mut graph = ModuleGraph::new();

        let mut entry = Module::entry(ModuleId::new(self.options.entry_fragment()));
        entry.references = scanned.references;
        entry.async_blocks = scanned.async_blocks;

        // Externalize every request the entry makes before inserting the
        // entry itself, so stub ordering follows discovery order.
        let mut requests: Vec<String> = entry
            .references
            .iter()
            .map(|r| r.specifier.clone())
            .chain(
                entry
                    .async_blocks
                    .iter()
                    .flat_map(|b| b.requests.iter().map(|r| r.specifier.clone())),
            )
            .collect();
        requests.dedup();

        graph.add_module(entry);
        for request in requests {
            if self.options.externals.is_external(&request) {
                graph.add_module(Module::external(ModuleId::new(request)));
            }
        }

        tracing::debug!(modules = graph.len(), "module graph resolved");

        let compilation = Compilation {
            graph,
            entry_source: source.to_string(),
        };

        for plugin in &self.plugins {
            tracing::trace!(plugin = %plugin.name(), "firing modules_resolved");
            plugin.modules_resolved(&compilation.graph);
        }

        if self.plugins.iter().all(|p| p.should_emit(&compilation)) {
            self.emit(&compilation)?;
        } else {
            tracing::debug!("emission suppressed by plugin");
        }

        Ok(compilation)
    }

    fn validate_options(&self) -> Result<()> {
        if self.options.minify {
            return Err(Error::InvalidConfig(
                "minification erases per-reference identity; analysis requires minify = false"
                    .to_string(),
            ));
        }
        if self.options.concatenate_modules {
            return Err(Error::InvalidConfig(
                "module concatenation merges dependency edges; analysis requires \
                 concatenate_modules = false"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Write the entry chunk to the output directory. Only reached when no
    /// plugin vetoed emission.
    fn emit(&self, compilation: &Compilation) -> Result<()> {
        fs::create_dir_all(&self.options.output_dir)?;
        let out = self.options.output_dir.join("main.js");
        fs::write(&out, &compilation.entry_source)?;
        tracing::debug!(path = %out.display(), "emitted entry chunk");
        Ok(())
    }
}
