//! Opening a book: discovery, warm-up of the first pages and page geometry.

use crate::prelude::*;

/// A discovered book ready to hand to a [`Navigator`].
pub struct LoadedBook {
    pub pages: Arc<PageSequence>,
    pub cache: AssetCache,
    /// Width / height of the first decodable page, if any could be decoded.
    pub aspect_ratio: Option<f32>,
}

impl LoadedBook {
    pub fn aspect_ratio_or_default(&self) -> f32 {
        self.aspect_ratio.unwrap_or(DEFAULT_PAGE_AR)
    }
}

/// Discover the pages behind `source`, then prepare the first few so the
/// opening view and first turn are instant.
pub async fn load_book(
    source: Arc<dyn PageSource>,
    config: &FlipbookConfig,
    runtime: Handle,
) -> Result<LoadedBook, AppError> {
    let cache = AssetCache::new(source, config.cache.capacity, runtime)
        .with_decode_warmup(config.cache.decode_warmup);

    let pages = cache
        .discover(config.book.max_pages, config.cache.miss_run)
        .await;
    if pages.present() == 0 {
        return Err(AppError::NoPages(format!(
            "pages 1..={}",
            config.book.max_pages
        )));
    }

    cache.seed(&pages, config.cache.seed_pages).await;
    let aspect_ratio = cache.page_aspect_ratio(&pages);
    match aspect_ratio {
        Some(ar) => debug!("Page aspect ratio {:.3}", ar),
        None => warn!("No page could be decoded; assuming aspect ratio {:.3}", DEFAULT_PAGE_AR),
    }

    Ok(LoadedBook {
        pages: Arc::new(pages),
        cache,
        aspect_ratio,
    })
}

/// Open `location` (folder or base URL) and load it.
pub async fn open_book(location: &str, config: &FlipbookConfig, runtime: Handle) -> Result<LoadedBook, AppError> {
    log::info!("Opening {}", location);
    let source = page_source::open_source(location, config.source.naming.clone())?;
    load_book(source, config, runtime)
        .await
        .map_err(|e| match e {
            AppError::NoPages(_) => AppError::NoPages(location.to_string()),
            other => other,
        })
}
