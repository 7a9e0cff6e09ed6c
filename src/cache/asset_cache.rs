//! LRU cache of fetched and decode-warmed page images.

use std::sync::{MutexGuard, PoisonError};

use crate::prelude::*;

/// A page whose bytes are held locally, decoded when the warm-up succeeded.
pub struct PreparedAsset {
    pub handle: PageHandle,
    pub bytes: Vec<u8>,
    pub image: Option<DynamicImage>,
}

impl PreparedAsset {
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }
}

impl std::fmt::Debug for PreparedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedAsset")
            .field("handle", &self.handle)
            .field("bytes", &self.bytes.len())
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

/// What the rendering surface is handed for a page: the prepared local copy
/// when there is one, otherwise the original handle to load by itself.
#[derive(Debug, Clone)]
pub enum Renderable {
    Prepared(Arc<PreparedAsset>),
    Unprepared(PageHandle),
}

impl Renderable {
    pub fn handle(&self) -> &PageHandle {
        match self {
            Renderable::Prepared(asset) => &asset.handle,
            Renderable::Unprepared(handle) => handle,
        }
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self, Renderable::Prepared(_))
    }
}

/// Shared LRU of prepared pages, most recently used last.
pub type SharedPreparedCache = Arc<Mutex<LruCache<PageHandle, Arc<PreparedAsset>>>>;

/// Create a new shared LRU with room for `size` pages (at least one).
pub fn new_prepared_cache(size: usize) -> SharedPreparedCache {
    let size = NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN);
    Arc::new(Mutex::new(LruCache::new(size)))
}

/// Fetches pages from a [`PageSource`] ahead of display and keeps the most
/// recently used ones. Clones share the same cache.
#[derive(Clone)]
pub struct AssetCache {
    source: Arc<dyn PageSource>,
    prepared: SharedPreparedCache,
    runtime: Handle,
    decode_warmup: bool,
}

impl AssetCache {
    pub fn new(source: Arc<dyn PageSource>, capacity: usize, runtime: Handle) -> Self {
        Self {
            source,
            prepared: new_prepared_cache(capacity),
            runtime,
            decode_warmup: true,
        }
    }

    /// Skip decoding on prepare; only the bytes are cached.
    pub fn with_decode_warmup(mut self, decode_warmup: bool) -> Self {
        self.decode_warmup = decode_warmup;
        self
    }

    pub fn source(&self) -> &Arc<dyn PageSource> {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<PageHandle, Arc<PreparedAsset>>> {
        self.prepared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether `handle` is prepared. Does not count as a use.
    pub fn contains(&self, handle: &PageHandle) -> bool {
        self.lock().contains(handle)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Prepared copy of `handle` if cached (marking it most recently used),
    /// otherwise the handle itself.
    pub fn resolve(&self, handle: &PageHandle) -> Renderable {
        match self.lock().get(handle) {
            Some(asset) => Renderable::Prepared(Arc::clone(asset)),
            None => Renderable::Unprepared(handle.clone()),
        }
    }

    /// Fetch, warm-decode and cache `handle`. Returns at once when already
    /// cached. Failures are logged and leave the handle unprepared.
    pub async fn prepare(&self, handle: &PageHandle) {
        if self.contains(handle) {
            return;
        }

        let bytes = match self.source.fetch(handle).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Failed to fetch {}: {}", handle, e);
                return;
            }
        };

        let (bytes, image) = if self.decode_warmup {
            let decoded = self
                .runtime
                .spawn_blocking(move || {
                    let decoded = image::load_from_memory(&bytes);
                    (bytes, decoded)
                })
                .await;
            match decoded {
                Ok((bytes, Ok(img))) => (bytes, Some(img)),
                Ok((bytes, Err(e))) => {
                    debug!("Warm-up decode of {} failed: {}", handle, e);
                    (bytes, None)
                }
                Err(e) => {
                    debug!("Failed to join decode task for {}: {:?}", handle, e);
                    return;
                }
            }
        } else {
            (bytes, None)
        };

        self.insert(PreparedAsset {
            handle: handle.clone(),
            bytes,
            image,
        });
    }

    fn insert(&self, asset: PreparedAsset) {
        let mut lru = self.lock();
        if lru.contains(&asset.handle) {
            lru.promote(&asset.handle);
            return;
        }
        let handle = asset.handle.clone();
        if let Some((evicted, _)) = lru.push(handle.clone(), Arc::new(asset)) {
            debug!("Evicted prepared page {} for {}", evicted, handle);
        }
        debug!("Prepared page {} ({} cached)", handle, lru.len());
    }

    /// Prepare `handles` in the background. The returned gate opens when all
    /// of them have been attempted.
    pub fn prefetch(&self, handles: Vec<PageHandle>) -> PrefetchGate {
        let pending: Vec<PageHandle> = handles.into_iter().filter(|h| !self.contains(h)).collect();
        if pending.is_empty() {
            return PrefetchGate::open();
        }

        let cache = self.clone();
        let task = self.runtime.spawn(async move {
            join_all(pending.iter().map(|handle| cache.prepare(handle))).await;
        });
        PrefetchGate::spawned(task)
    }

    /// Prepare the first `count` pages of the book.
    pub async fn seed(&self, pages: &PageSequence, count: usize) {
        let handles: Vec<&PageHandle> = (1..=count.min(pages.page_count()))
            .filter_map(|i| pages.handle(i))
            .collect();
        join_all(handles.into_iter().map(|handle| self.prepare(handle))).await;
    }

    /// Width / height of the first decoded page, scanning from page 1.
    pub fn page_aspect_ratio(&self, pages: &PageSequence) -> Option<f32> {
        let lru = self.lock();
        (1..=pages.page_count())
            .filter_map(|i| pages.handle(i))
            .filter_map(|h| lru.peek(h).and_then(|asset| asset.dimensions()))
            .find(|(w, h)| *w > 0 && *h > 0)
            .map(|(w, h)| w as f32 / h as f32)
    }
}
