//! Unified page image sources for folders, web servers and in-memory books.

pub mod error;
pub mod naming;
pub mod prelude;

mod folder_source;
pub use folder_source::FolderPageSource;

mod web_source;
pub use web_source::WebPageSource;

mod memory_source;
pub use memory_source::MemoryPageSource;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::prelude::*;

/// Opaque reference to one page image: a file path or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageHandle(Arc<str>);

impl PageHandle {
    pub fn new(location: impl AsRef<str>) -> Self {
        Self(Arc::from(location.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PageHandle {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// =======================
// Trait and API (async)
// =======================
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Candidate handles for a page number, in the order they should be probed.
    fn candidates(&self, page: usize) -> Vec<PageHandle>;
    /// Whether `handle` resolves to something fetchable.
    async fn exists(&self, handle: &PageHandle) -> bool;
    /// Raw bytes behind `handle`.
    async fn fetch(&self, handle: &PageHandle) -> Result<Vec<u8>, SourceError>;
}

/// Open a folder path or an `http(s)://` base URL as a page source.
pub fn open_source(location: &str, naming: NamingScheme) -> Result<Arc<dyn PageSource>, SourceError> {
    let lower = location.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(Arc::new(WebPageSource::new(location, naming)));
    }

    let path = Path::new(location);
    if path.is_dir() {
        Ok(Arc::new(FolderPageSource::new(path, naming)?))
    } else {
        Err(SourceError::UnsupportedLocation(location.to_string()))
    }
}
