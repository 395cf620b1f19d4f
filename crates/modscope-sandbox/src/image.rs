//! The filesystem image a sandbox mounts at boot.
//!
//! An image is an ordered list of relative paths with file contents, packed
//! from a directory tree and serialized with bincode. The manager loads it
//! once, caches it, and materializes it into each freshly booted root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, SandboxError};

/// One file inside a [`FilesystemImage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Path relative to the sandbox root.
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// A mountable snapshot of a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesystemImage {
    entries: Vec<ImageEntry>,
}

impl FilesystemImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.entries.push(ImageEntry {
            path: path.into(),
            contents: contents.into(),
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pack a directory tree into an image. Entry order follows the walk
    /// (directories before their contents, sorted by file name) so packing
    /// is deterministic.
    pub fn pack_dir(root: &Path) -> Result<Self> {
        let mut image = Self::new();
        for entry in walkdir::WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| SandboxError::Image(e.to_string()))?
                .to_path_buf();
            let contents = std::fs::read(entry.path())?;
            image.entries.push(ImageEntry {
                path: relative,
                contents,
            });
        }
        Ok(image)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| SandboxError::Image(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map(|(image, _)| image)
            .map_err(|e| SandboxError::Image(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_round_trips_through_bytes() {
        let mut image = FilesystemImage::new();
        image.add_file("src/index.js", b"export {};".to_vec());
        image.add_file("package.json", b"{}".to_vec());

        let bytes = image.to_bytes().unwrap();
        let back = FilesystemImage::from_bytes(&bytes).unwrap();
        assert_eq!(image, back);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(matches!(
            FilesystemImage::from_bytes(b"not an image"),
            Err(SandboxError::Image(_))
        ));
    }

    #[test]
    fn pack_dir_collects_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/a.js"), "1").unwrap();
        std::fs::write(dir.path().join("b.txt"), "2").unwrap();

        let image = FilesystemImage::pack_dir(dir.path()).unwrap();
        let paths: Vec<_> = image
            .entries()
            .map(|e| e.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(paths, ["b.txt", "src/a.js"]);
    }
}
