//! Finding out how many pages a book has.

use crate::prelude::*;

impl AssetCache {
    /// First candidate for `page` that the source can serve.
    pub async fn probe(&self, page: usize) -> Option<PageHandle> {
        for candidate in self.source().candidates(page) {
            if self.source().exists(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    /// Probe pages `1..=max_probe` in order. Once a page has been found, a run
    /// of `miss_run` consecutive misses ends the scan; shorter gaps become
    /// missing slots.
    pub async fn discover(&self, max_probe: usize, miss_run: usize) -> PageSequence {
        let mut slots: Vec<Option<PageHandle>> = Vec::new();
        let mut found = false;
        let mut misses = 0;

        for page in 1..=max_probe {
            match self.probe(page).await {
                Some(handle) => {
                    slots.push(Some(handle));
                    found = true;
                    misses = 0;
                }
                None => {
                    slots.push(None);
                    if found {
                        misses += 1;
                        if misses >= miss_run.max(1) {
                            debug!("Stopping discovery after {} misses at page {}", misses, page);
                            break;
                        }
                    }
                }
            }
        }

        let pages = PageSequence::from_slots(slots);
        log::info!(
            "Discovered {} pages ({} missing)",
            pages.page_count(),
            pages.page_count() - pages.present()
        );
        pages
    }
}
