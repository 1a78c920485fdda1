//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::storage::{Entry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores file contents in memory. Directories are implied by file paths and
/// can also be added explicitly. Use the builder methods to configure the
/// mock with test data.
///
/// # Example
///
/// ```ignore
/// use pages_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide/.pages", "title: User Guide")
///     .with_file("guide/setup.md", "# Setup");
///
/// let meta = storage.read("guide/.pages").unwrap();
/// let entries = storage.list("guide").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
    unreadable: BTreeSet<String>,
}

/// Parent directories of a path, innermost first, excluding the root.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').rev().map(move |(i, _)| &path[..i])
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content. Parent directories are created implicitly.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.dirs.extend(ancestors(&path).map(str::to_owned));
        self.files.insert(path, content.into());
        self
    }

    /// Add an (possibly empty) directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.dirs.extend(ancestors(&path).map(str::to_owned));
        self.dirs.insert(path);
        self
    }

    /// Mark a path as unreadable: `read` fails with permission denied.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    fn is_dir(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<String, StorageError> {
        if self.unreadable.contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn list(&self, dir: &str) -> Result<Vec<Entry>, StorageError> {
        if !self.is_dir(dir) {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }

        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };
        let direct_child = |path: &str| -> Option<String> {
            let rest = path.strip_prefix(prefix.as_str())?;
            (!rest.is_empty() && !rest.contains('/')).then(|| rest.to_owned())
        };

        let mut entries: Vec<Entry> = self
            .files
            .keys()
            .filter_map(|path| direct_child(path))
            .map(Entry::file)
            .chain(
                self.dirs
                    .iter()
                    .filter_map(|path| direct_child(path))
                    .map(Entry::dir),
            )
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_file() {
        let storage = MockStorage::new().with_file("a/.pages", "title: A");

        assert_eq!(storage.read("a/.pages").unwrap(), "title: A");
    }

    #[test]
    fn test_read_missing() {
        let storage = MockStorage::new();

        let err = storage.read(".pages").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_read_unreadable() {
        let storage = MockStorage::new()
            .with_file(".pages", "title: x")
            .with_unreadable(".pages");

        let err = storage.read(".pages").unwrap_err();

        assert_eq!(err.kind(), &StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_implicit_directories() {
        let storage = MockStorage::new().with_file("a/b/1.md", "# One");

        assert_eq!(storage.list("").unwrap(), vec![Entry::dir("a")]);
        assert_eq!(storage.list("a").unwrap(), vec![Entry::dir("b")]);
        assert_eq!(storage.list("a/b").unwrap(), vec![Entry::file("1.md")]);
        assert!(storage.read("a/b/2.md").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_root() {
        let storage = MockStorage::new()
            .with_file("index.md", "# Home")
            .with_file("guide/setup.md", "# Setup")
            .with_dir("empty");

        assert_eq!(
            storage.list("").unwrap(),
            vec![
                Entry::dir("empty"),
                Entry::dir("guide"),
                Entry::file("index.md"),
            ]
        );
    }

    #[test]
    fn test_list_nested() {
        let storage = MockStorage::new()
            .with_file("guide/setup.md", "# Setup")
            .with_file("guide/advanced/tips.md", "# Tips")
            .with_file("other.md", "");

        assert_eq!(
            storage.list("guide").unwrap(),
            vec![Entry::dir("advanced"), Entry::file("setup.md")]
        );
    }

    #[test]
    fn test_list_missing_dir() {
        let storage = MockStorage::new();

        assert!(storage.list("nope").unwrap_err().is_not_found());
    }
}
