//! Explicit ordering of navigation items.

/// Entry standing for "every item not listed explicitly".
pub const REST_TOKEN: &str = "...";

/// Error for an ordering entry that matches no item.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArrangeError {
    /// No item has this key.
    #[error("Arrange entry \"{0}\" does not match any item")]
    EntryNotFound(String),
}

/// Result of [`arrange`].
#[derive(Debug, PartialEq, Eq)]
pub struct Arrangement<T> {
    /// Items in their new order.
    pub items: Vec<T>,
    /// Entries that matched no item, in order of appearance.
    pub unmatched: Vec<String>,
}

impl<T> Arrangement<T> {
    /// Items, or an error for the first unmatched entry.
    ///
    /// # Errors
    ///
    /// Returns [`ArrangeError::EntryNotFound`] if any entry matched nothing.
    pub fn into_result(self) -> Result<Vec<T>, ArrangeError> {
        match self.unmatched.into_iter().next() {
            Some(entry) => Err(ArrangeError::EntryNotFound(entry)),
            None => Ok(self.items),
        }
    }
}

/// Reorder `items` following `order`.
///
/// Each entry of `order` moves the first remaining item whose key equals the
/// entry. Without [`REST_TOKEN`], items not mentioned are dropped; with it,
/// they are inserted at its position in their original order. Items with no
/// key can only be kept through the rest token.
pub fn arrange<T, F>(items: Vec<T>, order: &[String], key: F) -> Arrangement<T>
where
    F: Fn(&T) -> Option<String>,
{
    let keys: Vec<Option<String>> = items.iter().map(&key).collect();
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();

    let mut head = Vec::with_capacity(slots.len());
    let mut tail = Vec::new();
    let mut unmatched = Vec::new();
    let mut has_rest = false;

    for entry in order {
        if entry == REST_TOKEN {
            has_rest = true;
            continue;
        }
        let found = keys
            .iter()
            .zip(&slots)
            .position(|(k, slot)| slot.is_some() && k.as_deref() == Some(entry.as_str()));
        match found.and_then(|i| slots[i].take()) {
            Some(item) if has_rest => tail.push(item),
            Some(item) => head.push(item),
            None => unmatched.push(entry.clone()),
        }
    }

    if has_rest {
        head.extend(slots.into_iter().flatten());
    }
    head.extend(tail);

    Arrangement {
        items: head,
        unmatched,
    }
}
