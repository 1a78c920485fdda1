//! Per-directory metadata loaded from YAML files.
//!
//! Provides [`Meta`] for the navigation overrides of a single directory.
//!
//! # Metadata Files
//!
//! Metadata is stored in a YAML file (default: `.pages`) inside the directory
//! it applies to. All keys are optional and unknown keys are ignored:
//!
//! - `title`: string, replaces the section title
//! - `arrange`: list of file or directory names, `...` stands for the rest
//! - `collapse`: bool, collapse this section if it has a single child
//! - `collapse_single_pages`: bool, default for `collapse` in this subtree
//! - `hide`: bool, remove this section from the navigation

use pages_storage::{Storage, StorageError};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use crate::arrange::REST_TOKEN;

/// Resolved metadata of one directory.
///
/// All override fields are optional. When a field is `None`, the metadata
/// file did not set it (or there is no metadata file).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    /// Path of the metadata file relative to the docs root, if one applies.
    pub path: Option<String>,
    /// Section title override.
    pub title: Option<String>,
    /// Explicit ordering of the directory's children.
    pub arrange: Option<Vec<String>>,
    /// Collapse this section when it has exactly one child.
    pub collapse: Option<bool>,
    /// Default for `collapse` in this section and its descendants.
    pub collapse_single_pages: Option<bool>,
    /// Remove this section from the navigation.
    pub hide: Option<bool>,
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// YAML parsing error.
    #[error("Invalid YAML in {path}: {message}")]
    Parse {
        /// Metadata file path.
        path: String,
        /// Parser message.
        message: String,
    },
    /// A known key has a value of the wrong type.
    #[error("Expected {expected} for \"{field}\" in {path}")]
    InvalidType {
        /// Metadata file path.
        path: String,
        /// Offending key.
        field: &'static str,
        /// Human readable expected type.
        expected: &'static str,
    },
    /// The rest token appears more than once in `arrange`.
    #[error("\"...\" may only appear once in \"arrange\" in {path}")]
    DuplicateRestToken {
        /// Metadata file path.
        path: String,
    },
    /// Metadata file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Storage {
        /// Metadata file path.
        path: String,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}

/// Keys recognised in a metadata file, before type checks.
#[derive(Deserialize)]
struct RawMeta {
    title: Option<Value>,
    arrange: Option<Value>,
    collapse: Option<Value>,
    collapse_single_pages: Option<Value>,
    hide: Option<Value>,
}

fn invalid_type(path: &str, field: &'static str, expected: &'static str) -> MetaError {
    MetaError::InvalidType {
        path: path.to_owned(),
        field,
        expected,
    }
}

fn expect_bool(
    value: Option<Value>,
    path: &str,
    field: &'static str,
) -> Result<Option<bool>, MetaError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(_) => Err(invalid_type(path, field, "a boolean")),
    }
}

fn expect_string(
    value: Option<Value>,
    path: &str,
    field: &'static str,
) -> Result<Option<String>, MetaError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(invalid_type(path, field, "a string")),
    }
}

fn expect_string_list(
    value: Option<Value>,
    path: &str,
    field: &'static str,
) -> Result<Option<Vec<String>>, MetaError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Sequence(entries)) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(s) => Ok(s),
                _ => Err(invalid_type(path, field, "a list of strings")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(invalid_type(path, field, "a list of strings")),
    }
}

impl Meta {
    /// Metadata with only a source path and no overrides.
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Parse metadata from YAML content read from `path`.
    ///
    /// Empty content (or a YAML `null` document) yields metadata with no
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a known key has the wrong
    /// type, or `arrange` contains the rest token more than once.
    pub fn from_yaml(content: &str, path: &str) -> Result<Self, MetaError> {
        if content.trim().is_empty() {
            return Ok(Self::with_path(path));
        }

        let raw: Option<RawMeta> =
            serde_yaml::from_str(content).map_err(|e| MetaError::Parse {
                path: path.to_owned(),
                message: e.to_string(),
            })?;
        let Some(raw) = raw else {
            return Ok(Self::with_path(path));
        };

        let arrange = expect_string_list(raw.arrange, path, "arrange")?;
        if let Some(entries) = &arrange
            && entries.iter().filter(|e| *e == REST_TOKEN).count() > 1
        {
            return Err(MetaError::DuplicateRestToken {
                path: path.to_owned(),
            });
        }

        Ok(Self {
            path: Some(path.to_owned()),
            title: expect_string(raw.title, path, "title")?,
            arrange,
            collapse: expect_bool(raw.collapse, path, "collapse")?,
            collapse_single_pages: expect_bool(
                raw.collapse_single_pages,
                path,
                "collapse_single_pages",
            )?,
            hide: expect_bool(raw.hide, path, "hide")?,
        })
    }

    /// Load metadata from `path` through `storage`.
    ///
    /// - No path: metadata with nothing set.
    /// - Missing file: metadata with only the path set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn try_load_from(storage: &dyn Storage, path: Option<&str>) -> Result<Self, MetaError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match storage.read(path) {
            Ok(content) => {
                debug!(path, "Loaded navigation metadata");
                Self::from_yaml(&content, path)
            }
            Err(e) if e.is_not_found() => Ok(Self::with_path(path)),
            Err(source) => Err(MetaError::Storage {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Directory the metadata file lives in (`""` for the docs root).
    #[must_use]
    pub fn dir(&self) -> Option<&str> {
        self.path.as_deref().map(crate::dirname)
    }

}
