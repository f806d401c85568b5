//! PackageInstaller trait: the host platform's artifact installer
//!
//! Host installers report failure through several channels at once. Adapters
//! fill an [`InstallReport`] and collapse it with [`InstallReport::into_result`],
//! so callers only ever look at one [`InstallResult`].

use async_trait::async_trait;

use crate::types::ItemKind;

/// Reason used when the installer only says "no"
pub const GENERIC_INSTALL_FAILURE: &str = "installation failed";

/// Raw installer report, one field per failure channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Whether the installer's own return value signalled success
    pub success: bool,
    /// Structured error returned by the install call
    pub error: Option<String>,
    /// Error recorded by the installer's progress reporter
    pub skin_error: Option<String>,
    /// Accumulated error messages from the progress reporter
    pub skin_errors: Vec<String>,
}

impl InstallReport {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_skin_error(mut self, error: impl Into<String>) -> Self {
        self.skin_error = Some(error.into());
        self
    }

    pub fn with_skin_errors(mut self, errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.skin_errors.extend(errors.into_iter().map(Into::into));
        self
    }

    /// Collapse the channels: structured error, skin error, error list, then
    /// the boolean. The first non-empty one wins.
    pub fn into_result(self) -> InstallResult {
        if let Some(error) = self.error.filter(|e| !e.trim().is_empty()) {
            return InstallResult::Failed(error);
        }
        if let Some(error) = self.skin_error.filter(|e| !e.trim().is_empty()) {
            return InstallResult::Failed(error);
        }
        let listed: Vec<String> = self
            .skin_errors
            .into_iter()
            .filter(|e| !e.trim().is_empty())
            .collect();
        if !listed.is_empty() {
            return InstallResult::Failed(listed.join("; "));
        }
        if !self.success {
            return InstallResult::Failed(GENERIC_INSTALL_FAILURE.to_string());
        }
        InstallResult::Installed
    }
}

/// Normalized installer outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallResult {
    Installed,
    Failed(String),
}

/// Installs artifacts from a download URL on the host platform
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Fetch, unpack and register the artifact at `download_url`
    async fn install(&self, kind: ItemKind, download_url: &str) -> InstallResult;

    /// Activate an installed plugin for every site in the network
    async fn activate_network_wide(&self, slug: &str) -> Result<(), String>;
}
