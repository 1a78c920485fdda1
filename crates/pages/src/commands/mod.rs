//! CLI command implementations.

pub(crate) mod meta;
pub(crate) mod nav;

use std::path::PathBuf;

use clap::Args;
use pages_config::{CliSettings, Config};
use pages_nav::Options;
use pages_storage::FsStorage;
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use meta::MetaArgs;
pub(crate) use nav::NavArgs;

/// Arguments shared by all commands.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover pages.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "PAGES_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Metadata filename (overrides config).
    #[arg(long)]
    filename: Option<String>,

    /// Collapse sections with a single child by default.
    #[arg(long)]
    collapse_single_pages: bool,

    /// Warn instead of failing on arrange entries that match nothing.
    #[arg(long)]
    no_strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration and open the docs directory.
    pub(crate) fn load(&self, output: &Output) -> Result<(FsStorage, Options), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            filename: self.filename.clone(),
            collapse_single_pages: self.collapse_single_pages.then_some(true),
            strict: self.no_strict.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));

        let storage = FsStorage::new(config.docs_resolved.source_dir.clone());
        debug!(
            source_dir = %storage.source_dir().display(),
            filename = %config.pages.filename,
            strict = config.pages.strict,
            "Opened docs directory"
        );
        Ok((storage, options_from_config(&config)))
    }
}

/// Build navigation options from the loaded configuration.
pub(crate) fn options_from_config(config: &Config) -> Options {
    Options {
        filename: config.pages.filename.clone(),
        collapse_single_pages: config.pages.collapse_single_pages,
        strict: config.pages.strict,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_options_from_default_config() {
        let config = Config::default();

        assert_eq!(options_from_config(&config), Options::default());
        assert_eq!(config.pages.filename, pages_nav::DEFAULT_FILENAME);
    }
}
