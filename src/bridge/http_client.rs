//! HTTP implementation of `RepositoryClient`

use async_trait::async_trait;
use std::time::Duration;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::{RepoxError, Result};
use crate::storage::RepositoryConfig;
use crate::types::{ItemKind, SearchResults};

use super::repository_client::{parse_response, search_url, RepositoryClient};

/// Repository client over reqwest
pub struct HttpRepositoryClient {
    client: reqwest::Client,
}

impl HttpRepositoryClient {
    /// Create a client with the default 30 second timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("repox/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Build the search request without sending it
    pub fn build_search_request(
        &self,
        config: &RepositoryConfig,
        kind: ItemKind,
        query: &str,
    ) -> Result<reqwest::Request> {
        let url = search_url(config, kind, query)?;
        let request = config.credentials().apply(self.client.get(&url));
        request
            .build()
            .map_err(|e| RepoxError::Configuration(format!("Invalid repository URL: {e}")))
    }
}

#[async_trait]
impl RepositoryClient for HttpRepositoryClient {
    async fn search(
        &self,
        config: &RepositoryConfig,
        kind: ItemKind,
        query: &str,
    ) -> Result<SearchResults> {
        let request = self.build_search_request(config, kind, query)?;
        tracing::debug!(
            url = %request.url(),
            auth = config.credentials().scheme(),
            "searching repository"
        );

        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %kind, "repository search failed");
            return Err(RepoxError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let results = parse_response(&body)?;

        tracing::debug!(count = results.entries().len(), %kind, "repository search complete");
        Ok(results)
    }
}
