//! Builders shared by unit tests.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

use crate::item::NavItem;
use crate::options::Options;

pub(crate) fn page(title: &str, path: &str) -> NavItem {
    NavItem::page(title, path)
}

/// Link whose URL equals its title.
pub(crate) fn link(title: &str) -> NavItem {
    NavItem::link(title, title)
}

pub(crate) fn section(title: &str, children: Vec<NavItem>) -> NavItem {
    NavItem::section(title, children)
}

pub(crate) fn options() -> Options {
    Options::default()
}

/// Source paths of all pages in display order.
pub(crate) fn page_paths(items: &[NavItem]) -> Vec<String> {
    let mut paths = Vec::new();
    for item in items {
        match item {
            NavItem::Page(page) => paths.push(page.src_path.clone()),
            NavItem::Section(section) => paths.extend(page_paths(&section.children)),
            NavItem::Link(_) => {}
        }
    }
    paths
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with `warn`-level events captured, returning its result and the log text.
pub(crate) fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
