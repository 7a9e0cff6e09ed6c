//! The discovered, immutable list of page slots.

use crate::prelude::*;

/// Page slots numbered from 1; slot 0 is reserved. A `None` slot is a page
/// known to be missing and is displayed blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSequence {
    slots: Vec<Option<PageHandle>>,
}

impl PageSequence {
    /// Build from slots for pages `1..=slots.len()`. Trailing missing pages are dropped.
    pub fn from_slots(slots: impl IntoIterator<Item = Option<PageHandle>>) -> Self {
        let mut all: Vec<Option<PageHandle>> = std::iter::once(None).chain(slots).collect();
        while all.len() > 1 && all.last().is_some_and(|s| s.is_none()) {
            all.pop();
        }
        Self { slots: all }
    }

    pub fn page_count(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    /// Handle for page `index`; `None` for missing pages and out-of-range indices.
    pub fn handle(&self, index: usize) -> Option<&PageHandle> {
        if index == 0 {
            return None;
        }
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Number of pages that have an image.
    pub fn present(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(name: &str) -> Option<PageHandle> {
        Some(PageHandle::new(name))
    }

    #[test]
    fn slots_are_one_indexed() {
        let pages = PageSequence::from_slots([h("a"), None, h("c")]);
        assert_eq!(pages.page_count(), 3);
        assert_eq!(pages.handle(0), None);
        assert_eq!(pages.handle(1).map(|p| p.as_str()), Some("a"));
        assert_eq!(pages.handle(2), None);
        assert_eq!(pages.handle(3).map(|p| p.as_str()), Some("c"));
        assert_eq!(pages.handle(4), None);
        assert_eq!(pages.present(), 2);
    }

    #[test]
    fn trailing_missing_pages_are_trimmed() {
        let pages = PageSequence::from_slots([h("a"), h("b"), None, None]);
        assert_eq!(pages.page_count(), 2);

        let empty = PageSequence::from_slots([None, None]);
        assert!(empty.is_empty());
        assert_eq!(empty.handle(1), None);
    }
}
