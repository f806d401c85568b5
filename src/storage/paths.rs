use std::path::PathBuf;

use crate::types::TenantScope;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "REPOX_CONFIG_DIR";

/// Manages all filesystem paths for repox configuration
#[derive(Debug, Clone)]
pub struct RepoxPaths {
    pub config_dir: PathBuf,
}

impl RepoxPaths {
    /// Resolve the configuration directory: `$REPOX_CONFIG_DIR`, else `~/.config/repox`
    pub fn new() -> Option<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(Self::with_dir(PathBuf::from(dir)));
        }
        let home = dirs::home_dir()?;
        Some(Self::with_dir(home.join(".config").join("repox")))
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Create directories if they don't exist
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.config_dir).await
    }

    /// Path to the application config.yaml file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    /// Path to the repository options record for a tenant scope
    pub fn options_file(&self, scope: TenantScope) -> PathBuf {
        match scope {
            TenantScope::SingleSite => self.config_dir.join("site-options.yaml"),
            TenantScope::Network => self.config_dir.join("network-options.yaml"),
        }
    }
}
