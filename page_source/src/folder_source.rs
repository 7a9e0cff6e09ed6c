use std::path::{Path, PathBuf};

use crate::prelude::*;

/// Numbered page images stored flat in one directory.
pub struct FolderPageSource {
    pub path: PathBuf,
    pub naming: NamingScheme,
}

impl FolderPageSource {
    pub fn new(path: &Path, naming: NamingScheme) -> Result<Self, SourceError> {
        if !path.is_dir() {
            return Err(SourceError::UnsupportedLocation(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            naming,
        })
    }
}

#[async_trait::async_trait]
impl PageSource for FolderPageSource {
    fn candidates(&self, page: usize) -> Vec<PageHandle> {
        self.naming
            .file_names(page)
            .into_iter()
            .map(|name| PageHandle::new(self.path.join(name).to_string_lossy()))
            .collect()
    }

    async fn exists(&self, handle: &PageHandle) -> bool {
        tokio::fs::metadata(handle.as_str())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn fetch(&self, handle: &PageHandle) -> Result<Vec<u8>, SourceError> {
        match tokio::fs::read(handle.as_str()).await {
            Ok(buf) => Ok(buf),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(handle.to_string()))
            }
            Err(e) => Err(SourceError::Io(e)),
        }
    }
}
