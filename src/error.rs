//! Unified error type for the flipbook viewer.

use thiserror::Error;

/// Errors raised at the edges of the viewer: config, opening a location,
/// discovery. Page turns themselves never fail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Page source error: {0}")]
    Source(#[from] page_source::error::SourceError),
    #[error("No page images found at {0}")]
    NoPages(String),
}
