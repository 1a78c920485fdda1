//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading a docs directory from the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Entry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Resolves `/`-separated relative paths against a source directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use pages_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let meta = storage.read("guide/.pages")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory of the docs.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Root directory of the docs.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a path doesn't escape the docs root.
    ///
    /// Rejects absolute paths and paths with a `..` segment.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if path.starts_with('/') || path.split('/').any(|segment| segment == "..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve a relative path to a filesystem path.
    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.source_dir.clone(), |acc, segment| acc.join(segment))
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self.resolve(path);
        if full_path.is_dir() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))
    }

    fn list(&self, dir: &str) -> Result<Vec<Entry>, StorageError> {
        Self::validate_path(dir)?;
        let io_err =
            |e: std::io::Error| StorageError::io(e, Some(PathBuf::from(dir))).with_backend(BACKEND);

        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(dir)).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
