use crate::prelude::*;

/// Page images served over HTTP under a common base URL.
pub struct WebPageSource {
    pub base_url: String,
    pub naming: NamingScheme,
    client: reqwest::Client,
}

impl WebPageSource {
    pub fn new(base_url: &str, naming: NamingScheme) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            naming,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl PageSource for WebPageSource {
    fn candidates(&self, page: usize) -> Vec<PageHandle> {
        self.naming
            .file_names(page)
            .into_iter()
            .map(|name| PageHandle::new(format!("{}/{}", self.base_url, name)))
            .collect()
    }

    async fn exists(&self, handle: &PageHandle) -> bool {
        match self.client.head(handle.as_str()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                log::debug!("HEAD {} failed: {}", handle, e);
                false
            }
        }
    }

    /// Download and return the raw bytes of a page image.
    async fn fetch(&self, handle: &PageHandle) -> Result<Vec<u8>, SourceError> {
        let resp = self.client.get(handle.as_str()).send().await.map_err(|e| {
            SourceError::NetworkError(format!("Failed to GET {}: {}", handle, e))
        })?;

        if !resp.status().is_success() {
            return Err(SourceError::HttpStatus {
                status: resp.status().as_u16(),
                url: handle.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| {
            SourceError::NetworkError(format!("Failed to read bytes from {}: {}", handle, e))
        })?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_join_base_url() {
        let source = WebPageSource::new("https://example.com/book/", NamingScheme::default());
        let first = source.candidates(4).remove(0);
        assert_eq!(first.as_str(), "https://example.com/book/page-4.jpg");
    }
}
