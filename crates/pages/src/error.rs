//! CLI error types.

use pages_config::ConfigError;
use pages_nav::{MetaError, NavigationError};
use pages_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Meta(#[from] MetaError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
