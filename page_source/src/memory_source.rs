use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::prelude::*;

/// In-memory book, keyed by `mem://page-{n}` handles.
///
/// Pages can be marked as failing, in which case they still exist for
/// discovery but `fetch` returns an error.
#[derive(Default)]
pub struct MemoryPageSource {
    pages: HashMap<PageHandle, Vec<u8>>,
    failing: HashSet<PageHandle>,
    fetches: AtomicUsize,
    fetch_log: Mutex<Vec<PageHandle>>,
}

impl MemoryPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_for(page: usize) -> PageHandle {
        PageHandle::new(format!("mem://page-{}", page))
    }

    /// Store `bytes` as page `page`.
    pub fn with_page(mut self, page: usize, bytes: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(Self::handle_for(page), bytes.into());
        self
    }

    /// Pages `1..=count`, each holding a tiny placeholder payload.
    pub fn with_pages(mut self, count: usize) -> Self {
        for page in 1..=count {
            self = self.with_page(page, format!("page {}", page).into_bytes());
        }
        self
    }

    /// Remove page `page` entirely, leaving a hole in the numbering.
    pub fn without_page(mut self, page: usize) -> Self {
        self.pages.remove(&Self::handle_for(page));
        self
    }

    /// Keep page `page` discoverable but make every fetch of it fail.
    pub fn failing_page(mut self, page: usize) -> Self {
        self.failing.insert(Self::handle_for(page));
        self
    }

    /// Number of `fetch` calls served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Handles passed to `fetch`, in call order.
    pub fn fetched(&self) -> Vec<PageHandle> {
        self.fetch_log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl PageSource for MemoryPageSource {
    fn candidates(&self, page: usize) -> Vec<PageHandle> {
        vec![Self::handle_for(page)]
    }

    async fn exists(&self, handle: &PageHandle) -> bool {
        self.pages.contains_key(handle)
    }

    async fn fetch(&self, handle: &PageHandle) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.fetch_log.lock() {
            log.push(handle.clone());
        }
        if self.failing.contains(handle) {
            return Err(SourceError::NetworkError(format!("injected failure for {}", handle)));
        }
        self.pages
            .get(handle)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(handle.to_string()))
    }
}
