//! Navigation tree types.
//!
//! A navigation is an ordered list of [`NavItem`]s. Sections nest further
//! items; pages point at a markdown source relative to the docs root; links
//! point at an arbitrary URL. The types carry only what is needed to resolve
//! and rewrite the tree, not any rendering state.

use serde::Serialize;

/// Documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Display title.
    pub title: String,
    /// Source path relative to the docs root (e.g., "guide/setup.md").
    pub src_path: String,
}

impl Page {
    /// File name of the source (e.g., "setup.md" for "guide/setup.md").
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.src_path
            .rsplit_once('/')
            .map_or(self.src_path.as_str(), |(_, name)| name)
    }
}

/// Group of navigation items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Display title.
    pub title: String,
    /// Child items in display order.
    pub children: Vec<NavItem>,
}

/// External or absolute link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
}

/// Navigation tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavItem {
    /// Page with a markdown source.
    Page(Page),
    /// Section with children.
    Section(Section),
    /// Link to a URL.
    Link(Link),
}

impl NavItem {
    /// Create a page item.
    #[must_use]
    pub fn page(title: impl Into<String>, src_path: impl Into<String>) -> Self {
        Self::Page(Page {
            title: title.into(),
            src_path: src_path.into(),
        })
    }

    /// Create a section item.
    #[must_use]
    pub fn section(title: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self::Section(Section {
            title: title.into(),
            children,
        })
    }

    /// Create a link item.
    #[must_use]
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link(Link {
            title: title.into(),
            url: url.into(),
        })
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Page(page) => &page.title,
            Self::Section(section) => &section.title,
            Self::Link(link) => &link.title,
        }
    }
}

/// Collect pages in depth-first display order.
fn collect_pages<'a>(items: &'a [NavItem], pages: &mut Vec<&'a Page>) {
    for item in items {
        match item {
            NavItem::Page(page) => pages.push(page),
            NavItem::Section(section) => collect_pages(&section.children, pages),
            NavItem::Link(_) => {}
        }
    }
}

/// Rewritten navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Top-level items.
    pub items: Vec<NavItem>,
}

impl Navigation {
    /// Create a navigation from top-level items.
    #[must_use]
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    /// All pages in display order.
    #[must_use]
    pub fn pages(&self) -> Vec<&Page> {
        let mut pages = Vec::new();
        collect_pages(&self.items, &mut pages);
        pages
    }

    /// Page shown before the page with `src_path`, if any.
    #[must_use]
    pub fn previous_page(&self, src_path: &str) -> Option<&Page> {
        let pages = self.pages();
        let index = pages.iter().position(|p| p.src_path == src_path)?;
        index.checked_sub(1).map(|i| pages[i])
    }

    /// Page shown after the page with `src_path`, if any.
    #[must_use]
    pub fn next_page(&self, src_path: &str) -> Option<&Page> {
        let pages = self.pages();
        let index = pages.iter().position(|p| p.src_path == src_path)?;
        pages.get(index + 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Navigation {
        Navigation::new(vec![
            NavItem::page("Home", "index.md"),
            NavItem::section(
                "Guide",
                vec![
                    NavItem::page("Setup", "guide/setup.md"),
                    NavItem::link("Repo", "https://example.com"),
                    NavItem::page("Usage", "guide/usage.md"),
                ],
            ),
            NavItem::page("About", "about.md"),
        ])
    }

    #[test]
    fn test_page_file_name() {
        let NavItem::Page(nested) = NavItem::page("Setup", "guide/setup.md") else {
            unreachable!()
        };
        let NavItem::Page(root) = NavItem::page("Home", "index.md") else {
            unreachable!()
        };

        assert_eq!(nested.file_name(), "setup.md");
        assert_eq!(root.file_name(), "index.md");
    }

    #[test]
    fn test_title() {
        assert_eq!(NavItem::page("Page", "p.md").title(), "Page");
        assert_eq!(NavItem::section("Section", vec![]).title(), "Section");
        assert_eq!(NavItem::link("Link", "/x").title(), "Link");
    }

    #[test]
    fn test_pages_depth_first() {
        let nav = sample();
        let paths: Vec<&str> = nav.pages().iter().map(|p| p.src_path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["index.md", "guide/setup.md", "guide/usage.md", "about.md"]
        );
    }

    #[test]
    fn test_previous_and_next_page() {
        let nav = sample();

        assert_eq!(nav.previous_page("index.md"), None);
        assert_eq!(
            nav.next_page("index.md").map(|p| p.src_path.as_str()),
            Some("guide/setup.md")
        );
        assert_eq!(
            nav.next_page("guide/setup.md").map(|p| p.src_path.as_str()),
            Some("guide/usage.md")
        );
        assert_eq!(
            nav.previous_page("about.md").map(|p| p.src_path.as_str()),
            Some("guide/usage.md")
        );
        assert_eq!(nav.next_page("about.md"), None);
        assert_eq!(nav.next_page("missing.md"), None);
    }

    #[test]
    fn test_serialize_tagged() {
        let nav = Navigation::new(vec![NavItem::section(
            "Guide",
            vec![NavItem::page("Setup", "guide/setup.md")],
        )]);

        let json = serde_json::to_value(&nav).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "type": "section",
                    "title": "Guide",
                    "children": [{
                        "type": "page",
                        "title": "Setup",
                        "src_path": "guide/setup.md"
                    }]
                }]
            })
        );
    }
}
