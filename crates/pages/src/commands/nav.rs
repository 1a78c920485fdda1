//! `pages nav` command implementation.

use std::fmt::Write;

use clap::Args;
use pages_nav::{AwesomeNavigation, NavItem, Navigation, scan_navigation};
use tracing::debug;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the navigation as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, scanning or metadata loading fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (storage, options) = self.common.load(output)?;

        let items = scan_navigation(&storage)?;
        debug!(items = items.len(), "Scanned navigation");
        let navigation = AwesomeNavigation::build(&items, options, &storage)?.apply(items)?;

        debug!(pages = navigation.pages().len(), "Applied navigation metadata");

        if navigation.items.is_empty() {
            output.warning("Navigation is empty: no markdown pages found");
        }

        if self.json {
            output.result(&serde_json::to_string_pretty(&navigation)?);
        } else {
            output.result(render_tree(&navigation).trim_end());
        }
        Ok(())
    }
}

/// Render a navigation as an indented tree.
fn render_tree(navigation: &Navigation) -> String {
    let mut out = String::new();
    render_items(&navigation.items, 0, &mut out);
    out
}

fn render_items(items: &[NavItem], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for item in items {
        // Writing to a String cannot fail.
        let _ = match item {
            NavItem::Page(page) => writeln!(out, "{indent}{} ({})", page.title, page.src_path),
            NavItem::Section(section) => writeln!(out, "{indent}{}/", section.title),
            NavItem::Link(link) => writeln!(out, "{indent}{} -> {}", link.title, link.url),
        };
        if let NavItem::Section(section) = item {
            render_items(&section.children, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_tree() {
        let navigation = Navigation::new(vec![
            NavItem::page("Home", "index.md"),
            NavItem::section(
                "Guide",
                vec![
                    NavItem::page("Setup", "guide/setup.md"),
                    NavItem::link("Repo", "https://example.com/repo"),
                ],
            ),
        ]);

        assert_eq!(
            render_tree(&navigation),
            "Home (index.md)\nGuide/\n  Setup (guide/setup.md)\n  Repo -> https://example.com/repo\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tree(&Navigation::default()), "");
    }
}
