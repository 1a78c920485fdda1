//! Configuration management for pages.
//!
//! Parses `pages.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//!
//! [pages]
//! filename = ".pages"
//! collapse_single_pages = false
//! strict = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override metadata filename.
    pub filename: Option<String>,
    /// Override default for collapsing single-page sections.
    pub collapse_single_pages: Option<bool>,
    /// Override strict mode.
    pub strict: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pages.toml";

/// Default metadata filename. Must match `pages_nav::DEFAULT_FILENAME`.
const DEFAULT_META_FILENAME: &str = ".pages";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Navigation metadata options.
    pub pages: PagesConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// Navigation metadata configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagesConfig {
    /// Name of the per-directory metadata file.
    pub filename: String,
    /// Collapse sections with a single child unless a metadata file says otherwise.
    pub collapse_single_pages: bool,
    /// Fail on arrange entries that match nothing instead of warning.
    pub strict: bool,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_META_FILENAME.to_owned(),
            collapse_single_pages: false,
            strict: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pages.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(filename) = &settings.filename {
            self.pages.filename.clone_from(filename);
        }
        if let Some(collapse) = settings.collapse_single_pages {
            self.pages.collapse_single_pages = collapse;
        }
        if let Some(strict) = settings.strict {
            self.pages.strict = strict;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            pages: PagesConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_pages()
    }

    /// Validate the metadata filename.
    ///
    /// The filename is joined onto every section directory, so it must be a
    /// single path segment.
    fn validate_pages(&self) -> Result<(), ConfigError> {
        let filename = &self.pages.filename;
        if filename.is_empty() {
            return Err(ConfigError::Validation(
                "pages.filename cannot be empty".to_owned(),
            ));
        }
        if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
            return Err(ConfigError::Validation(format!(
                "pages.filename must be a plain file name, got {filename:?}"
            )));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.pages.filename, ".pages");
        assert!(!config.pages.collapse_single_pages);
        assert!(config.pages.strict);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pages, PagesConfig::default());
    }

    #[test]
    fn test_parse_pages_config() {
        let toml = r#"
[pages]
filename = ".index"
collapse_single_pages = true
strict = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.pages,
            PagesConfig {
                filename: ".index".to_owned(),
                collapse_single_pages: true,
                strict: false,
            }
        );
    }

    #[test]
    fn test_parse_partial_pages_config() {
        let toml = r"
[pages]
strict = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.pages.filename, ".pages");
        assert!(!config.pages.strict);
    }

    #[test]
    fn test_parse_invalid_type() {
        let toml = r#"
[pages]
strict = "yes"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
    }

    #[test]
    fn test_resolve_paths_default_source_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/docs")
        );
    }

    #[test]
    fn test_validate_empty_filename() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.pages.filename = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("pages.filename"));
    }

    #[test]
    fn test_validate_filename_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.pages.filename = "meta/.pages".to_owned();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_dot_filename() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.pages.filename = "..".to_owned();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            filename: Some(".nav".to_owned()),
            collapse_single_pages: Some(true),
            strict: None,
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.pages.filename, ".nav");
        assert!(config.pages.collapse_single_pages);
        assert!(config.pages.strict); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.pages, PagesConfig::default());
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pages.toml");
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"content\"\n\n[pages]\nfilename = \".order\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("content"));
        assert_eq!(config.pages.filename, ".order");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/pages.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pages.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            filename: Some(String::new()),
            ..Default::default()
        };

        let err = Config::load(Some(path.as_path()), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
