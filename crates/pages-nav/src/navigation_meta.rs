//! Metadata resolution for a navigation tree.
//!
//! Every section is matched with the metadata file of the directory its
//! content lives in. The directory of a section is the common dirname of its
//! children: pages contribute their source path, nested sections contribute
//! their own directory, and links contribute nothing. A section whose children
//! span several directories (or that has no pages at all) gets no metadata
//! file.
//!
//! For example, with pages `a/b/1.md` and `c/e/2.md`:
//!
//! ```text
//! A            -> a/.pages
//! └── B        -> a/b/.pages
//!     └── 1.md
//! C            -> (none: D has no directory)
//! ├── D        -> (none)
//! └── E        -> c/e/.pages
//!     └── 2.md
//! ```

use std::collections::HashMap;
use std::fmt;

use pages_storage::{Storage, join_path};
use tracing::debug;

use crate::item::NavItem;
use crate::meta::{Meta, MetaError};
use crate::options::Options;

/// Position of a section in the navigation tree.
///
/// Child indices from the top-level list down to the section. Keys refer to
/// the tree the [`NavigationMeta`] was built from, before any rewriting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey(Vec<usize>);

impl SectionKey {
    /// Key of the (virtual) root that holds the top-level items.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Key of the child at `index` of this section.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Child indices from the top-level list down to the section.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<&[usize]> for SectionKey {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for SectionKey {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join("."))
    }
}

/// Directory part of a `/`-separated path (`""` when there is none).
#[must_use]
pub fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Directory shared by all paths, if there is exactly one.
///
/// Returns `None` if `paths` is empty, if any entry is `None`, or if the
/// entries disagree on their directory. `Some("")` is the docs root.
#[must_use]
pub fn common_dirname<'a>(paths: &[Option<&'a str>]) -> Option<&'a str> {
    let (first, rest) = paths.split_first()?;
    let dir = first.map(dirname);
    rest.iter()
        .all(|path| path.map(dirname) == dir)
        .then_some(dir)
        .flatten()
}

/// Metadata file paths derived from a navigation tree, before loading.
#[derive(Debug, Default)]
struct MetaPaths {
    root: Option<String>,
    sections: Vec<(SectionKey, Option<String>)>,
}

/// Walks a tree, recording the metadata file path of every section.
struct PathCollector<'a> {
    filename: &'a str,
    sections: Vec<(SectionKey, Option<String>)>,
}

impl PathCollector<'_> {
    /// Resolve the directory of `items`, recording paths of nested sections.
    fn collect(&mut self, items: &[NavItem], parent: &SectionKey) -> Option<String> {
        let mut paths: Vec<Option<String>> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                NavItem::Page(page) => paths.push(Some(page.src_path.clone())),
                NavItem::Section(section) => {
                    let key = parent.child(index);
                    let dir = self.collect(&section.children, &key);
                    let meta_path = dir.as_deref().map(|d| join_path(d, self.filename));
                    self.sections.push((key, meta_path));
                    paths.push(dir);
                }
                NavItem::Link(_) => {}
            }
        }
        let borrowed: Vec<Option<&str>> = paths.iter().map(Option::as_deref).collect();
        common_dirname(&borrowed).map(str::to_owned)
    }
}

fn meta_paths(items: &[NavItem], filename: &str) -> MetaPaths {
    let mut collector = PathCollector {
        filename,
        sections: Vec::new(),
    };
    let root_dir = collector.collect(items, &SectionKey::root());
    MetaPaths {
        root: root_dir.as_deref().map(|d| join_path(d, filename)),
        sections: collector.sections,
    }
}

/// Metadata of every section of a navigation tree, plus the root.
///
/// Built once per navigation pass and immutable afterwards. Every section
/// reachable from the tree has exactly one entry (possibly without any
/// overrides).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationMeta {
    sections: HashMap<SectionKey, Meta>,
    root: Meta,
}

impl NavigationMeta {
    /// Resolve and load metadata for every section of `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metadata file exists but can't be read or parsed.
    pub fn build(
        items: &[NavItem],
        options: &Options,
        storage: &dyn Storage,
    ) -> Result<Self, MetaError> {
        let paths = meta_paths(items, &options.filename);

        let mut sections = HashMap::with_capacity(paths.sections.len());
        for (key, path) in paths.sections {
            debug!(section = %key, path = ?path, "Resolved section metadata path");
            let meta = Meta::try_load_from(storage, path.as_deref())?;
            sections.insert(key, meta);
        }
        let root = Meta::try_load_from(storage, paths.root.as_deref())?;

        Ok(Self { sections, root })
    }

    /// Assemble from already resolved metadata.
    #[must_use]
    pub fn from_parts(root: Meta, sections: HashMap<SectionKey, Meta>) -> Self {
        Self { sections, root }
    }

    /// Metadata of the docs root (top-level items).
    #[must_use]
    pub fn root(&self) -> &Meta {
        &self.root
    }

    /// Metadata of the section at `key`.
    #[must_use]
    pub fn section(&self, key: &SectionKey) -> Option<&Meta> {
        self.sections.get(key)
    }

    /// Iterate over all section entries.
    pub fn sections(&self) -> impl Iterator<Item = (&SectionKey, &Meta)> {
        self.sections.iter()
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the tree had no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
