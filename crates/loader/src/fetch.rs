// Manifest fetching: one plain GET per intercepted request, no retry.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::LoaderError;

/// Transport seam for the interception pipeline. The production
/// implementation wraps a `reqwest::Client`; tests inject fakes.
#[async_trait]
pub trait ManifestFetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Bytes, LoaderError>;
}

pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    /// The client's defaults govern timeouts; no custom headers are added.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManifestFetch for ManifestFetcher {
    /// Single attempt. Transport errors, non-success statuses, and empty
    /// bodies all collapse into `Transport`; no partial data is delivered.
    async fn fetch(&self, url: &Url) -> Result<Bytes, LoaderError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LoaderError::transport(url.as_str(), e.to_string()))?;
        if !response.status().is_success() {
            return Err(LoaderError::transport(
                url.as_str(),
                format!("HTTP {}", response.status()),
            ));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoaderError::transport(url.as_str(), e.to_string()))?;
        if bytes.is_empty() {
            return Err(LoaderError::transport(url.as_str(), "empty response body"));
        }
        debug!(url = %url, size = bytes.len(), "fetched manifest");
        Ok(bytes)
    }
}
