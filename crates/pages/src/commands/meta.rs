//! `pages meta` command implementation.

use clap::Args;
use pages_nav::{Meta, NavItem, NavigationMeta, SectionKey, scan_navigation};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl MetaArgs {
    /// Execute the meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, scanning or metadata loading fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (storage, options) = self.common.load(output)?;

        let items = scan_navigation(&storage)?;
        let meta = NavigationMeta::build(&items, &options, &storage)?;

        output.result(&format!("(root) {}", describe(meta.root())));
        for line in section_lines(&items, &SectionKey::root(), &meta) {
            output.result(&line);
        }
        Ok(())
    }
}

/// One line per section, in tree order, with its title path and metadata.
fn section_lines(items: &[NavItem], parent: &SectionKey, meta: &NavigationMeta) -> Vec<String> {
    let mut lines = Vec::new();
    collect_lines(items, parent, "", meta, &mut lines);
    lines
}

fn collect_lines(
    items: &[NavItem],
    parent: &SectionKey,
    prefix: &str,
    meta: &NavigationMeta,
    lines: &mut Vec<String>,
) {
    for (index, item) in items.iter().enumerate() {
        let NavItem::Section(section) = item else {
            continue;
        };
        let key = parent.child(index);
        let label = format!("{prefix}{}", section.title);
        let description = meta.section(&key).map_or_else(|| "(unresolved)".to_owned(), describe);
        lines.push(format!("{label} {description}"));
        collect_lines(&section.children, &key, &format!("{label} / "), meta, lines);
    }
}

/// Short description of a metadata entry: its path and the overrides it sets.
fn describe(meta: &Meta) -> String {
    let mut parts = vec![meta.path.clone().unwrap_or_else(|| "-".to_owned())];
    if let Some(title) = &meta.title {
        parts.push(format!("title={title:?}"));
    }
    if let Some(arrange) = &meta.arrange {
        parts.push(format!("arrange=[{}]", arrange.join(", ")));
    }
    if let Some(collapse) = meta.collapse {
        parts.push(format!("collapse={collapse}"));
    }
    if let Some(collapse) = meta.collapse_single_pages {
        parts.push(format!("collapse_single_pages={collapse}"));
    }
    if let Some(hide) = meta.hide {
        parts.push(format!("hide={hide}"));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_describe_empty() {
        assert_eq!(describe(&Meta::default()), "-");
        assert_eq!(describe(&Meta::with_path("a/.pages")), "a/.pages");
    }

    #[test]
    fn test_describe_overrides() {
        let meta = Meta {
            path: Some("guide/.pages".to_owned()),
            title: Some("Guide".to_owned()),
            arrange: Some(vec!["intro.md".to_owned(), "...".to_owned()]),
            collapse: None,
            collapse_single_pages: Some(true),
            hide: Some(false),
        };

        assert_eq!(
            describe(&meta),
            "guide/.pages title=\"Guide\" arrange=[intro.md, ...] collapse_single_pages=true hide=false"
        );
    }

    #[test]
    fn test_section_lines() {
        let items = vec![
            NavItem::page("Home", "index.md"),
            NavItem::section(
                "Guide",
                vec![NavItem::section(
                    "Advanced",
                    vec![NavItem::page("Tips", "guide/advanced/tips.md")],
                )],
            ),
        ];
        let meta = NavigationMeta::from_parts(
            Meta::with_path(".pages"),
            HashMap::from([
                (SectionKey::from([1]), Meta::with_path("guide/.pages")),
                (SectionKey::from([1, 0]), Meta::with_path("guide/advanced/.pages")),
            ]),
        );

        assert_eq!(
            section_lines(&items, &SectionKey::root(), &meta),
            vec![
                "Guide guide/.pages".to_owned(),
                "Guide / Advanced guide/advanced/.pages".to_owned(),
            ]
        );
    }
}
