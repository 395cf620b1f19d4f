//! # modscope-compiler
//!
//! The build orchestrator: feeds entry source into the sandbox, runs the
//! analysis process, and folds everything that can go wrong into a
//! [`CompileOutcome`] value. Nothing here throws past the `compile`
//! boundary; callers distinguish failure modes by inspecting the outcome's
//! typed error.
//!
//! ```no_run
//! use std::sync::Arc;
//! use modscope_compiler::{Compiler, CompilerConfig};
//! use modscope_sandbox::{ImageSource, Sandbox, SandboxConfig};
//!
//! # async fn demo() {
//! let sandbox = Arc::new(Sandbox::new(SandboxConfig {
//!     image: ImageSource::File("compiler.img".into()),
//! }));
//! let compiler = Compiler::new(sandbox, CompilerConfig::new("modscope-analyze"));
//!
//! let outcome = compiler.compile("import { a } from \"x\";").await;
//! if let Some(result) = outcome.data() {
//!     println!("{} dependencies", result.dependencies.len());
//! }
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use modscope_graph::ExtractionResult;
use modscope_sandbox::{Sandbox, SandboxError};

/// Failure modes of one compile attempt.
///
/// `Build` and `Decode` are deliberately distinct: a non-zero exit is a
/// user-source problem reported by the analysis process, while undecodable
/// output from a zero exit is a contract violation in the instrumentation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The sandbox could not be initialized or operated on.
    #[error("Sandbox failure: {0}")]
    Sandbox(#[from] SandboxError),

    /// The analysis process exited non-zero; the detail is its output,
    /// verbatim.
    #[error("{0}")]
    Build(String),

    /// The analysis process exited zero but its output was not the expected
    /// JSON shape.
    #[error("Failed to decode analysis output: {parse_error}\n--- raw output ---\n{raw}")]
    Decode { raw: String, parse_error: String },
}

/// Result of one compile-and-analyze attempt.
#[derive(Debug)]
pub enum CompileOutcome {
    Success(ExtractionResult),
    Failure(CompileError),
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Success(_))
    }

    pub fn data(&self) -> Option<&ExtractionResult> {
        match self {
            CompileOutcome::Success(result) => Some(result),
            CompileOutcome::Failure(_) => None,
        }
    }

    pub fn into_data(self) -> Option<ExtractionResult> {
        match self {
            CompileOutcome::Success(result) => Some(result),
            CompileOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CompileError> {
        match self {
            CompileOutcome::Success(_) => None,
            CompileOutcome::Failure(err) => Some(err),
        }
    }

    /// Failure detail as shown to the user, preserved unmodified.
    pub fn error_text(&self) -> Option<String> {
        self.error().map(|err| err.to_string())
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Program spawned inside the sandbox to run the analysis.
    pub analyzer_program: PathBuf,
    /// Fixed entry-module path inside the sandbox filesystem.
    pub entry_path: PathBuf,
}

impl CompilerConfig {
    pub fn new(analyzer_program: impl Into<PathBuf>) -> Self {
        Self {
            analyzer_program: analyzer_program.into(),
            entry_path: PathBuf::from("src/index.js"),
        }
    }
}

/// The build orchestrator.
///
/// Overlapping `compile` calls are not deduplicated: they race on the fixed
/// entry path and on the spawned process. Callers keep at most one compile
/// in flight. There is no cancellation and no timeout.
pub struct Compiler {
    sandbox: Arc<Sandbox>,
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(sandbox: Arc<Sandbox>, config: CompilerConfig) -> Self {
        Self { sandbox, config }
    }

    pub fn sandbox(&self) -> &Arc<Sandbox> {
        &self.sandbox
    }

    /// Compile-and-analyze one source snippet. Every failure (sandbox,
    /// process, decode) comes back as a failure outcome, never a panic or
    /// an `Err` the caller must route separately.
    pub async fn compile(&self, source: &str) -> CompileOutcome {
        match self.try_compile(source).await {
            Ok(result) => CompileOutcome::Success(result),
            Err(err) => {
                tracing::debug!(error = %err, "compile failed");
                CompileOutcome::Failure(err)
            }
        }
    }

    async fn try_compile(&self, source: &str) -> Result<ExtractionResult, CompileError> {
        self.sandbox.initialize().await?;

        if let Some(parent) = self.config.entry_path.parent() {
            if parent != std::path::Path::new("") {
                self.sandbox.make_directory(parent).await?;
            }
        }
        self.sandbox
            .write_file(&self.config.entry_path, source.as_bytes())
            .await?;

        tracing::debug!(program = %self.config.analyzer_program.display(), "spawning analysis process");
        let process = self
            .sandbox
            .spawn(self.config.analyzer_program.as_os_str(), &[])
            .await?;

        // The full stream is accumulated before parsing; a partial read
        // would truncate large graphs.
        let output = process.wait_with_output().await?;

        if !output.success() {
            return Err(CompileError::Build(output.combined()));
        }

        serde_json::from_str(output.stdout.trim()).map_err(|err| CompileError::Decode {
            raw: output.stdout,
            parse_error: err.to_string(),
        })
    }
}
