//! Navigation rewriting driven by per-directory metadata.
//!
//! [`AwesomeNavigation`] walks the navigation tree once and applies the
//! metadata resolved by [`NavigationMeta`]:
//!
//! 1. children are reordered with `arrange`
//! 2. sections with `hide: true` are removed
//! 3. section titles are replaced by `title`
//! 4. sections left without children are removed
//! 5. sections with a single child are replaced by that child when
//!    `collapse` (or the inherited `collapse_single_pages`) is set

use pages_storage::Storage;
use tracing::{debug, warn};

use crate::arrange::{ArrangeError, arrange};
use crate::item::{NavItem, Navigation, Section};
use crate::meta::{Meta, MetaError};
use crate::navigation_meta::{NavigationMeta, SectionKey};
use crate::options::Options;

/// Error returned when rewriting the navigation fails.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Metadata file could not be loaded.
    #[error(transparent)]
    Meta(#[from] MetaError),
    /// `arrange` lists an entry that matches no page or section (strict mode).
    #[error("Arrange entry \"{entry}\" in {path} does not match any page or section")]
    ArrangeEntryNotFound {
        /// Unmatched entry.
        entry: String,
        /// Metadata file containing the entry.
        path: String,
    },
}

/// Navigation rewriter bound to the metadata of one navigation tree.
#[derive(Debug)]
pub struct AwesomeNavigation {
    meta: NavigationMeta,
    options: Options,
}

impl AwesomeNavigation {
    /// Resolve metadata for `items` and prepare a rewriter for them.
    ///
    /// # Errors
    ///
    /// Returns an error if a metadata file exists but can't be read or parsed.
    pub fn build(
        items: &[NavItem],
        options: Options,
        storage: &dyn Storage,
    ) -> Result<Self, NavigationError> {
        let meta = NavigationMeta::build(items, &options, storage)?;
        Ok(Self::with_meta(meta, options))
    }

    /// Create a rewriter from already resolved metadata.
    #[must_use]
    pub fn with_meta(meta: NavigationMeta, options: Options) -> Self {
        Self { meta, options }
    }

    /// Resolved metadata.
    #[must_use]
    pub fn meta(&self) -> &NavigationMeta {
        &self.meta
    }

    /// Rewrite `items`.
    ///
    /// `items` must be the tree the metadata was resolved from: sections are
    /// matched with their metadata by position.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::ArrangeEntryNotFound`] in strict mode if an
    /// `arrange` entry matches nothing.
    pub fn apply(&self, items: Vec<NavItem>) -> Result<Navigation, NavigationError> {
        let root = self.meta.root();
        let root_path = root.path.as_deref().unwrap_or_default();
        if root.title.is_some() {
            warn!(path = root_path, "\"title\" has no effect in the root metadata file");
        }
        if root.hide.is_some() {
            warn!(path = root_path, "\"hide\" has no effect in the root metadata file");
        }

        let collapse = root
            .collapse_single_pages
            .unwrap_or(self.options.collapse_single_pages);
        let items = self.process_children(items, &SectionKey::root(), root, collapse)?;
        Ok(Navigation::new(items))
    }

    fn process_children(
        &self,
        children: Vec<NavItem>,
        parent: &SectionKey,
        meta: &Meta,
        collapse: bool,
    ) -> Result<Vec<NavItem>, NavigationError> {
        let indexed: Vec<(usize, NavItem)> = children.into_iter().enumerate().collect();
        let ordered = self.order(indexed, parent, meta)?;

        let mut result = Vec::with_capacity(ordered.len());
        for (index, item) in ordered {
            match item {
                NavItem::Section(section) => {
                    let key = parent.child(index);
                    if let Some(item) = self.process_section(section, key, collapse)? {
                        result.push(item);
                    }
                }
                other => result.push(other),
            }
        }
        Ok(result)
    }

    fn process_section(
        &self,
        section: Section,
        key: SectionKey,
        collapse: bool,
    ) -> Result<Option<NavItem>, NavigationError> {
        let fallback = Meta::default();
        let meta = self.meta.section(&key).unwrap_or(&fallback);

        if meta.hide == Some(true) {
            debug!(section = %key, title = section.title.as_str(), "Hiding section");
            return Ok(None);
        }

        let collapse = meta.collapse_single_pages.unwrap_or(collapse);
        let Section {
            mut title,
            children,
        } = section;
        if let Some(override_title) = &meta.title {
            title.clone_from(override_title);
        }

        let mut children = self.process_children(children, &key, meta, collapse)?;
        if children.is_empty() {
            return Ok(None);
        }

        if meta.collapse.unwrap_or(collapse) && children.len() == 1 {
            return Ok(children.pop());
        }

        Ok(Some(NavItem::Section(Section { title, children })))
    }

    /// Apply `arrange` of `meta` to children indexed by original position.
    fn order(
        &self,
        items: Vec<(usize, NavItem)>,
        parent: &SectionKey,
        meta: &Meta,
    ) -> Result<Vec<(usize, NavItem)>, NavigationError> {
        let Some(order) = &meta.arrange else {
            return Ok(items);
        };

        let arrangement = arrange(items, order, |(index, item)| {
            self.item_key(parent, *index, item)
        });
        let path = meta.path.as_deref().unwrap_or_default();

        if self.options.strict {
            return arrangement.into_result().map_err(|err| match err {
                ArrangeError::EntryNotFound(entry) => NavigationError::ArrangeEntryNotFound {
                    entry,
                    path: path.to_owned(),
                },
            });
        }

        for entry in &arrangement.unmatched {
            warn!(entry, path, "Arrange entry does not match any page or section");
        }
        Ok(arrangement.items)
    }

    /// Name an `arrange` entry refers to: the file name of a page or the
    /// directory name of a section. Links have none.
    fn item_key(&self, parent: &SectionKey, index: usize, item: &NavItem) -> Option<String> {
        match item {
            NavItem::Page(page) => Some(page.file_name().to_owned()),
            NavItem::Section(_) => {
                let dir = self.meta.section(&parent.child(index))?.dir()?;
                let name = dir.rsplit_once('/').map_or(dir, |(_, name)| name);
                (!name.is_empty()).then(|| name.to_owned())
            }
            NavItem::Link(_) => None,
        }
    }
}
