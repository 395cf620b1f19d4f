//! Resolved module metadata and the module graph.
//!
//! The graph here is deliberately shallow: one entry module carrying its
//! collected references, plus opaque external stubs for every specifier the
//! entry mentions. Nothing is fetched or resolved.

use rustc_hash::FxHashMap;

use crate::collect::{CollectedAsyncBlock, CollectedReference};

/// Identifier of a module within one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How a module entered the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// The designated entry module, parsed from source.
    Entry,
    /// An opaque external stub; never parsed or resolved.
    External,
}

/// One module in the graph.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub kind: ModuleKind,
    pub references: Vec<CollectedReference>,
    pub async_blocks: Vec<CollectedAsyncBlock>,
}

impl Module {
    pub fn entry(id: ModuleId) -> Self {
        Self {
            id,
            kind: ModuleKind::Entry,
            references: Vec::new(),
            async_blocks: Vec::new(),
        }
    }

    pub fn external(id: ModuleId) -> Self {
        Self {
            id,
            kind: ModuleKind::External,
            references: Vec::new(),
            async_blocks: Vec::new(),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.kind == ModuleKind::Entry
    }
}

/// Insertion-ordered module collection for one compilation.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    modules: Vec<Module>,
    index: FxHashMap<ModuleId, usize>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, replacing any earlier module with the same id while
    /// keeping its original position.
    pub fn add_module(&mut self, module: Module) {
        match self.index.get(&module.id) {
            Some(&pos) => self.modules[pos] = module,
            None => {
                self.index.insert(module.id.clone(), self.modules.len());
                self.modules.push(module);
            }
        }
    }

    pub fn get(&self, id: &ModuleId) -> Option<&Module> {
        self.index.get(id).map(|&pos| &self.modules[pos])
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Locate the module whose identifier contains the given path fragment.
    ///
    /// Mirrors how the analyzer finds the entry after resolution: module ids
    /// are absolute-ish paths and the configured entry is a relative one.
    pub fn find_by_identifier(&self, fragment: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.id.as_str().contains(fragment))
    }
}
