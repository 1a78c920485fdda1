//! Options controlling metadata resolution.

/// Default name of the per-directory metadata file.
pub const DEFAULT_FILENAME: &str = ".pages";

/// Options for [`NavigationMeta`](crate::NavigationMeta) and
/// [`AwesomeNavigation`](crate::AwesomeNavigation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Name of the metadata file looked up in every section directory.
    pub filename: String,
    /// Collapse sections with a single child unless metadata overrides it.
    pub collapse_single_pages: bool,
    /// Fail when an `arrange` entry matches nothing (warn otherwise).
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_owned(),
            collapse_single_pages: false,
            strict: true,
        }
    }
}
