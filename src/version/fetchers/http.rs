//! HTTP metadata fetcher

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, UpgradeConfig};
use crate::version::error::UpgradeError;
use crate::version::fetcher::MetadataFetcher;

/// Fetcher implementation backed by reqwest
pub struct HttpMetadataFetcher {
    client: reqwest::Client,
}

impl HttpMetadataFetcher {
    /// Creates a fetcher, routing every request through `proxy_url` when given.
    ///
    /// Fails if the proxy URL cannot be parsed.
    pub fn new(proxy_url: Option<&str>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(proxy_url, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    /// Like [`HttpMetadataFetcher::new`], with `timeout` bounding each whole request
    pub fn with_timeout(proxy_url: Option<&str>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent("zfs-upgrade-guard")
            .timeout(timeout);

        if let Some(proxy_url) = proxy_url {
            debug!("Metadata proxy: {}", proxy_url);
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &UpgradeConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.proxy_url())
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, UpgradeError> {
        let unavailable = |reason: String| UpgradeError::RemoteUnavailable {
            url: url.to_string(),
            reason,
        };

        debug!("Getting metadata from '{}'...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            warn!("Metadata endpoint returned status {}: {}", status, url);
            return Err(unavailable(format!("Unexpected status: {}", status)));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read metadata response: {}", e);
            unavailable(e.to_string())
        })?;

        debug!("Metadata body: {:?}", body);
        Ok(body)
    }
}
