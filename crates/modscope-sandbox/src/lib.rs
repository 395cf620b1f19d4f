//! # modscope-sandbox
//!
//! A lifecycle-managed isolated execution environment: a private filesystem
//! root seeded from a [`FilesystemImage`], plus process spawning rooted in
//! it. The [`Sandbox`] manager owns at most one live environment at a time;
//! boot is lazy, deduplicated under concurrent callers, and explicitly
//! reversed by [`Sandbox::teardown`].
//!
//! ```no_run
//! use modscope_sandbox::{ImageSource, Sandbox, SandboxConfig};
//!
//! # async fn demo() -> modscope_sandbox::Result<()> {
//! let sandbox = Sandbox::new(SandboxConfig {
//!     image: ImageSource::File("compiler.img".into()),
//! });
//!
//! sandbox.initialize().await?;
//! sandbox.write_file("src/index.js", b"import \"x\";").await?;
//! let process = sandbox.spawn("modscope-analyze", &[]).await?;
//! let output = process.wait_with_output().await?;
//! assert!(output.success());
//! sandbox.teardown().await;
//! # Ok(()) }
//! ```

pub mod image;
pub mod manager;
pub mod process;

pub use image::{FilesystemImage, ImageEntry};
pub use manager::{ImageSource, Sandbox, SandboxConfig, SandboxHandle, SandboxStatus};
pub use process::{ProcessOutput, SandboxProcess};

use std::path::PathBuf;

/// Errors produced by sandbox operations.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// The environment failed to boot or its image failed to load/mount.
    /// The manager resets to uninitialized so a later call may retry.
    #[error("Sandbox failed to boot: {0}")]
    Boot(String),

    /// An operation was attempted before a ready instance exists or after
    /// teardown.
    #[error("Sandbox not initialized")]
    NotReady,

    /// A path tried to escape the sandbox root.
    #[error("Path escapes the sandbox root: {}", .0.display())]
    PathEscape(PathBuf),

    /// Filesystem image could not be packed or decoded.
    #[error("Invalid filesystem image: {0}")]
    Image(String),

    /// I/O error inside the sandbox.
    #[error("Sandbox I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sandbox operations.
pub type Result<T> = std::result::Result<T, SandboxError>;
