use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unsupported page location: {0}")]
    UnsupportedLocation(String),
    #[error("Page not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Internal IO error: {0}")]
    Io(#[from] std::io::Error),
}
