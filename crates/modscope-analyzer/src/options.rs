//! Compiler driver configuration.

use std::path::{Path, PathBuf};

/// Which module specifiers are short-circuited into opaque externals.
///
/// The analysis run never resolves or fetches anything: every request other
/// than the entry itself becomes an external stub in the graph. The exempt
/// list holds identifier fragments (the entry path) that are recognized as
/// internal.
#[derive(Debug, Clone)]
pub struct ExternalsPolicy {
    exempt_fragments: Vec<String>,
}

impl ExternalsPolicy {
    /// Externalize everything except requests mentioning the entry path.
    pub fn all_except_entry(entry: &Path) -> Self {
        Self {
            exempt_fragments: vec![entry.to_string_lossy().into_owned()],
        }
    }

    pub fn is_external(&self, request: &str) -> bool {
        !self
            .exempt_fragments
            .iter()
            .any(|fragment| request.contains(fragment.as_str()))
    }
}

/// Options for one analysis compilation.
///
/// `minify` and `concatenate_modules` exist to be forced off: both would
/// erase per-reference identity and merge dependency edges, which makes
/// per-edge extraction impossible. The driver rejects configurations that
/// turn them on.
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    pub entry: PathBuf,
    pub output_dir: PathBuf,
    pub minify: bool,
    pub concatenate_modules: bool,
    pub externals: ExternalsPolicy,
}

impl CompilerOptions {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        let entry = entry.into();
        let externals = ExternalsPolicy::all_except_entry(&entry);
        Self {
            entry,
            output_dir: PathBuf::from("dist"),
            minify: false,
            concatenate_modules: false,
            externals,
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Identifier fragment used to locate the entry in the resolved graph.
    pub fn entry_fragment(&self) -> String {
        self.entry.to_string_lossy().into_owned()
    }
}
