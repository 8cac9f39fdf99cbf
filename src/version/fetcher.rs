//! Fetcher trait for retrieving remote release metadata

#[cfg(test)]
use mockall::automock;

use crate::version::error::UpgradeError;

/// Trait for fetching a text document from a remote source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetches the body of `url` as text
    ///
    /// # Returns
    /// * `Ok(String)` - Body of a successful (2xx) response
    /// * `Err(UpgradeError::RemoteUnavailable)` - Transport failure or non-2xx status
    async fn fetch_text(&self, url: &str) -> Result<String, UpgradeError>;
}
