//! Navigation metadata for documentation sites.
//!
//! Authors drop a small YAML file (default: `.pages`) into a docs directory to
//! control how the navigation for that directory is built:
//!
//! ```yaml
//! title: User Guide
//! arrange:
//!   - intro.md
//!   - setup
//!   - ...
//! collapse_single_pages: true
//! ```
//!
//! This crate provides:
//! - [`NavItem`]: the navigation tree of pages, sections and links
//! - [`NavigationMeta`]: resolves which metadata file applies to each section
//! - [`AwesomeNavigation`]: rewrites a navigation tree according to that metadata
//! - [`scan_navigation`]: builds the default navigation of a docs directory
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use pages_nav::{AwesomeNavigation, Options, scan_navigation};
//! use pages_storage::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let options = Options::default();
//!
//! let items = scan_navigation(&storage)?;
//! let navigation = AwesomeNavigation::build(&items, options, &storage)?.apply(items)?;
//! for page in navigation.pages() {
//!     println!("{}", page.src_path);
//! }
//! # Ok(())
//! # }
//! ```

mod arrange;
mod awesome;
mod item;
mod meta;
mod navigation_meta;
mod options;
mod scanner;
#[cfg(test)]
mod test_support;

pub use arrange::{ArrangeError, Arrangement, REST_TOKEN, arrange};
pub use awesome::{AwesomeNavigation, NavigationError};
pub use item::{Link, NavItem, Navigation, Page, Section};
pub use meta::{Meta, MetaError};
pub use navigation_meta::{NavigationMeta, SectionKey, common_dirname, dirname};
pub use options::{DEFAULT_FILENAME, Options};
pub use scanner::scan_navigation;
