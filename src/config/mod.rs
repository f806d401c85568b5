//! Application configuration for repox (`config.yaml`)
//!
//! This is the process-level configuration: which tenant scope the process
//! serves, how long repository calls may take and how the host installer is
//! reached. Repository URL and credentials live in the per-scope options
//! record instead (see [`crate::storage::OptionsStore`]).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::storage::RepoxPaths;
use crate::types::TenantScope;

/// Default timeout for repository requests, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// What to do when network activation fails after a successful install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Log the failure, report the install as successful
    #[default]
    BestEffort,
    /// Report the install as failed
    Required,
}

/// How to reach the host platform's installer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerSettings {
    /// WP-CLI executable
    #[serde(default = "default_wp_binary")]
    pub wp_binary: String,
    /// Site root passed as `--path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wp_path: Option<PathBuf>,
}

fn default_wp_binary() -> String {
    "wp".to_string()
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            wp_binary: default_wp_binary(),
            wp_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoxConfig {
    #[serde(default)]
    pub scope: TenantScope,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub activation_policy: ActivationPolicy,
    #[serde(default)]
    pub installer: InstallerSettings,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for RepoxConfig {
    fn default() -> Self {
        Self {
            scope: TenantScope::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            activation_policy: ActivationPolicy::default(),
            installer: InstallerSettings::default(),
        }
    }
}

impl RepoxConfig {
    /// Load config.yaml, falling back to defaults when it doesn't exist
    pub async fn load(paths: &RepoxPaths) -> Result<Self> {
        let path = paths.config_file();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = tokio::fs::read_to_string(&path).await?;
        let config: RepoxConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub async fn save(&self, paths: &RepoxPaths) -> Result<()> {
        paths.ensure_dirs().await?;
        let contents = serde_yaml::to_string(self)?;
        tokio::fs::write(paths.config_file(), contents).await?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RepoxConfig::default();
        assert_eq!(config.scope, TenantScope::SingleSite);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.activation_policy, ActivationPolicy::BestEffort);
        assert_eq!(config.installer.wp_binary, "wp");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: RepoxConfig = serde_yaml::from_str("scope: network\n").unwrap();
        assert_eq!(config.scope, TenantScope::Network);
        assert_eq!(config.request_timeout_secs, 30);

        let config: RepoxConfig =
            serde_yaml::from_str("activation_policy: required\ninstaller:\n  wp_path: /srv/wp\n")
                .unwrap();
        assert_eq!(config.activation_policy, ActivationPolicy::Required);
        assert_eq!(config.installer.wp_binary, "wp");
        assert_eq!(config.installer.wp_path, Some(PathBuf::from("/srv/wp")));
    }

    #[tokio::test]
    async fn test_load_missing_then_save() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RepoxPaths::with_dir(temp_dir.path().join("nested"));

        let config = RepoxConfig::load(&paths).await.unwrap();
        assert_eq!(config, RepoxConfig::default());

        let mut config = config;
        config.scope = TenantScope::Network;
        config.save(&paths).await.unwrap();

        let loaded = RepoxConfig::load(&paths).await.unwrap();
        assert_eq!(loaded.scope, TenantScope::Network);
    }
}
