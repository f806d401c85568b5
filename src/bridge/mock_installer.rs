//! Mock PackageInstaller and RepositoryClient for testing
//!
//! Both record every call so tests can assert what did (or did not) reach the
//! collaborators.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{RepoxError, Result};
use crate::storage::RepositoryConfig;
use crate::types::{ItemKind, RepositoryItem, SearchResults};

use super::package_installer::{InstallReport, InstallResult, PackageInstaller};
use super::repository_client::RepositoryClient;

/// Record of a call made to a mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Install { kind: ItemKind, download_url: String },
    Activate { slug: String },
    Search { kind: ItemKind, query: String },
    DownloadUrl { kind: ItemKind, slug: String },
}

pub struct MockInstaller {
    report: Mutex<InstallReport>,
    activation_error: Mutex<Option<String>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockInstaller {
    /// Installer that succeeds
    pub fn new() -> Self {
        Self {
            report: Mutex::new(InstallReport::succeeded()),
            activation_error: Mutex::new(None),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the raw report returned by `install`
    pub fn with_report(self, report: InstallReport) -> Self {
        *self.report.lock().unwrap() = report;
        self
    }

    /// Make network activation fail
    pub fn with_activation_error(self, error: impl Into<String>) -> Self {
        *self.activation_error.lock().unwrap() = Some(error.into());
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_log.lock().unwrap().iter().any(|call| {
            matches!(
                (call, method),
                (MockCall::Install { .. }, "install") | (MockCall::Activate { .. }, "activate")
            )
        })
    }
}

#[async_trait]
impl PackageInstaller for MockInstaller {
    async fn install(&self, kind: ItemKind, download_url: &str) -> InstallResult {
        self.call_log.lock().unwrap().push(MockCall::Install {
            kind,
            download_url: download_url.to_string(),
        });
        self.report.lock().unwrap().clone().into_result()
    }

    async fn activate_network_wide(&self, slug: &str) -> std::result::Result<(), String> {
        self.call_log.lock().unwrap().push(MockCall::Activate {
            slug: slug.to_string(),
        });
        match self.activation_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Repository client returning a canned body; URL composition is the real one
pub struct MockRepositoryClient {
    response: SearchResults,
    error_status: Option<u16>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockRepositoryClient {
    pub fn new() -> Self {
        Self {
            response: SearchResults::from(Vec::new()),
            error_status: None,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_items(mut self, items: Vec<RepositoryItem>) -> Self {
        self.response = SearchResults::from(items);
        self
    }

    /// Return an arbitrary decoded body from `search`
    pub fn with_response(mut self, body: serde_json::Value) -> Self {
        self.response = SearchResults::new(body);
        self
    }

    /// Make `search` fail with an HTTP status
    pub fn with_status_error(mut self, status: u16) -> Self {
        self.error_status = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn search(
        &self,
        config: &RepositoryConfig,
        kind: ItemKind,
        query: &str,
    ) -> Result<SearchResults> {
        self.call_log.lock().unwrap().push(MockCall::Search {
            kind,
            query: query.to_string(),
        });
        super::repository_client::search_url(config, kind, query)?;
        if let Some(status) = self.error_status {
            return Err(RepoxError::HttpStatus { status });
        }
        Ok(self.response.clone())
    }

    fn download_url(
        &self,
        config: &RepositoryConfig,
        kind: ItemKind,
        slug: &str,
    ) -> Option<String> {
        self.call_log.lock().unwrap().push(MockCall::DownloadUrl {
            kind,
            slug: slug.to_string(),
        });
        super::repository_client::download_url(config, kind, slug)
    }
}
