//! Default navigation of a docs directory.
//!
//! Builds the navigation a site generator produces when no navigation is
//! configured explicitly:
//! - `*.md` files become pages, titled by their first H1 heading or file name
//! - directories become sections, titled by their name
//! - `index.md` and `README.md` come first, the rest is sorted by name
//! - hidden entries (leading `.`) are skipped, as are empty directories

use std::sync::LazyLock;

use pages_storage::{Entry, Storage, StorageError, join_path};
use regex::Regex;
use tracing::debug;

use crate::item::NavItem;

/// First H1 heading of a markdown document.
static H1_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Scan `storage` from the docs root and build the default navigation.
///
/// # Errors
///
/// Returns [`StorageError`] if a directory can't be listed.
pub fn scan_navigation(storage: &dyn Storage) -> Result<Vec<NavItem>, StorageError> {
    scan_directory(storage, "")
}

fn scan_directory(storage: &dyn Storage, dir: &str) -> Result<Vec<NavItem>, StorageError> {
    let mut entries: Vec<Entry> = storage
        .list(dir)?
        .into_iter()
        .filter(|e| !e.name.starts_with('.'))
        .collect();
    entries.sort_by(|a, b| (!is_index(a), &a.name).cmp(&(!is_index(b), &b.name)));

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = join_path(dir, &entry.name);
        if entry.is_dir {
            let children = scan_directory(storage, &path)?;
            if children.is_empty() {
                debug!(path, "Skipping directory without pages");
                continue;
            }
            items.push(NavItem::section(titlecase_from_slug(&entry.name), children));
        } else if entry.name.ends_with(".md") {
            let title = page_title(storage, dir, &path, &entry.name);
            items.push(NavItem::page(title, path));
        }
    }
    Ok(items)
}

fn is_index(entry: &Entry) -> bool {
    !entry.is_dir && matches!(entry.name.as_str(), "index.md" | "README.md")
}

/// Resolve a page title: H1 heading, then file name.
///
/// Index pages without a heading are named after their directory, or "Home"
/// in the docs root.
fn page_title(storage: &dyn Storage, dir: &str, path: &str, name: &str) -> String {
    match storage.read(path) {
        Ok(content) => {
            if let Some(caps) = H1_REGEX.captures(&content) {
                return caps[1].trim().to_owned();
            }
        }
        Err(e) => debug!(path, error = %e, "Failed to read page for title extraction"),
    }

    let stem = name.strip_suffix(".md").unwrap_or(name);
    if matches!(stem, "index" | "README") {
        let dir_name = dir.rsplit_once('/').map_or(dir, |(_, last)| last);
        return if dir_name.is_empty() {
            "Home".to_owned()
        } else {
            titlecase_from_slug(dir_name)
        };
    }
    titlecase_from_slug(stem)
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
