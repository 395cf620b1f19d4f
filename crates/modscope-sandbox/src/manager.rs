//! Sandbox lifecycle: lazy deduplicated boot, mounted image, explicit
//! teardown.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use path_clean::clean;
use tempfile::TempDir;
use tokio::sync::Mutex;

use crate::image::FilesystemImage;
use crate::process::SandboxProcess;
use crate::{Result, SandboxError};

/// Where the manager obtains its filesystem image.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Load and decode a packed image file.
    File(PathBuf),
    /// Use an image already in memory.
    Inline(Arc<FilesystemImage>),
}

/// Sandbox manager configuration.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub image: ImageSource,
}

/// Observable lifecycle state of the managed environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxStatus {
    Idle,
    Booting,
    Ready,
    TornDown,
}

/// One booted environment: a private root seeded from the image.
#[derive(Debug)]
pub struct SandboxHandle {
    root: PathBuf,
    _temp: TempDir,
}

impl SandboxHandle {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a sandbox-relative path onto the private root. Absolute paths
    /// and `..` components are rejected rather than cleaned away.
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(SandboxError::PathEscape(path.to_path_buf()));
        }
        Ok(self.root.join(clean(path)))
    }
}

/// The sandbox lifecycle manager.
///
/// Owns at most one live environment. `initialize` is idempotent: concurrent
/// callers serialize through the internal state lock and observe a single
/// shared boot. The image fetch is cached independently of boot success, so
/// a retry after a failed boot does not re-fetch unless the fetch itself
/// failed. `teardown` clears everything, including that cache.
pub struct Sandbox {
    config: SandboxConfig,
    state: Mutex<Option<Arc<SandboxHandle>>>,
    image_cache: Mutex<Option<Arc<FilesystemImage>>>,
    status: parking_lot::Mutex<SandboxStatus>,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config,
            state: Mutex::new(None),
            image_cache: Mutex::new(None),
            status: parking_lot::Mutex::new(SandboxStatus::Idle),
        }
    }

    pub fn status(&self) -> SandboxStatus {
        *self.status.lock()
    }

    fn set_status(&self, status: SandboxStatus) {
        *self.status.lock() = status;
    }

    /// Boot the environment if needed and return the live handle.
    ///
    /// Boot and image retrieval are both slow, so they run in parallel; the
    /// image is mounted onto the booted root before this resolves.
    pub async fn initialize(&self) -> Result<Arc<SandboxHandle>> {
        let mut state = self.state.lock().await;
        if let Some(handle) = state.as_ref() {
            return Ok(Arc::clone(handle));
        }

        self.set_status(SandboxStatus::Booting);
        tracing::debug!("booting sandbox");

        let booted = match self.boot_and_mount().await {
            Ok(handle) => handle,
            Err(err) => {
                // Reset so a later call may retry from scratch.
                self.set_status(SandboxStatus::Idle);
                return Err(match err {
                    boot @ SandboxError::Boot(_) => boot,
                    other => SandboxError::Boot(other.to_string()),
                });
            }
        };

        let handle = Arc::new(booted);
        *state = Some(Arc::clone(&handle));
        self.set_status(SandboxStatus::Ready);
        tracing::debug!(root = %handle.root().display(), "sandbox ready");
        Ok(handle)
    }

    async fn boot_and_mount(&self) -> Result<SandboxHandle> {
        let (temp, image) = tokio::try_join!(Self::boot_root(), self.fetch_image())?;

        let handle = SandboxHandle {
            root: temp.path().to_path_buf(),
            _temp: temp,
        };
        Self::mount(&handle, &image).await?;
        Ok(handle)
    }

    async fn boot_root() -> Result<TempDir> {
        tokio::task::spawn_blocking(|| TempDir::with_prefix("modscope-sandbox-"))
            .await
            .map_err(|e| SandboxError::Boot(e.to_string()))?
            .map_err(SandboxError::Io)
    }

    /// Retrieve the filesystem image, deduplicated across calls. A cached
    /// image survives boot failures; only teardown evicts it.
    async fn fetch_image(&self) -> Result<Arc<FilesystemImage>> {
        let mut cache = self.image_cache.lock().await;
        if let Some(image) = cache.as_ref() {
            return Ok(Arc::clone(image));
        }

        let image = match &self.config.image {
            ImageSource::Inline(image) => Arc::clone(image),
            ImageSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                Arc::new(FilesystemImage::from_bytes(&bytes)?)
            }
        };

        tracing::debug!(files = image.len(), "filesystem image loaded");
        *cache = Some(Arc::clone(&image));
        Ok(image)
    }

    async fn mount(handle: &SandboxHandle, image: &FilesystemImage) -> Result<()> {
        for entry in image.entries() {
            let target = handle.resolve(&entry.path)?;
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&target, &entry.contents).await?;
        }
        Ok(())
    }

    async fn require_ready(&self) -> Result<Arc<SandboxHandle>> {
        self.state
            .lock()
            .await
            .as_ref()
            .map(Arc::clone)
            .ok_or(SandboxError::NotReady)
    }

    pub async fn write_file(&self, path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
        let handle = self.require_ready().await?;
        let target = handle.resolve(path.as_ref())?;
        tokio::fs::write(target, contents).await.map_err(Into::into)
    }

    pub async fn make_directory(&self, path: impl AsRef<Path>) -> Result<()> {
        let handle = self.require_ready().await?;
        let target = handle.resolve(path.as_ref())?;
        tokio::fs::create_dir_all(target).await.map_err(Into::into)
    }

    pub async fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let handle = self.require_ready().await?;
        let target = handle.resolve(path.as_ref())?;
        tokio::fs::read(target).await.map_err(Into::into)
    }

    /// Start a process with the sandbox root as its working directory.
    pub async fn spawn(&self, program: impl AsRef<OsStr>, args: &[&str]) -> Result<SandboxProcess> {
        let handle = self.require_ready().await?;
        SandboxProcess::spawn(program, args, handle.root())
    }

    /// Tear down the live environment and drop all cached state, including
    /// the image fetch. Idempotent no-op when nothing is live.
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        if let Some(handle) = state.take() {
            if let Err(err) = tokio::fs::remove_dir_all(handle.root()).await {
                tracing::warn!(error = %err, "failed to remove sandbox root");
            }
            self.set_status(SandboxStatus::TornDown);
            tracing::debug!("sandbox torn down");
        }
        self.image_cache.lock().await.take();
    }
}
