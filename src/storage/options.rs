//! Repository options, one record per tenant scope

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::RepoxPaths;
use crate::auth::Credentials;
use crate::error::Result;
use crate::sanitize::{sanitize_key, sanitize_text_field, sanitize_url};
use crate::types::TenantScope;

/// Authentication scheme used against the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    #[default]
    None,
    Basic,
    Token,
}

impl AuthMethod {
    /// Parse a submitted value; anything unrecognized is `None`
    pub fn from_raw(raw: &str) -> Self {
        match sanitize_key(raw).as_str() {
            "basic" => AuthMethod::Basic,
            "token" => AuthMethod::Token,
            _ => AuthMethod::None,
        }
    }
}

/// Stored repository settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Base URL of the repository API, always with one trailing slash (or empty)
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub auth_method: AuthMethod,
    #[serde(default)]
    pub auth_username: String,
    /// Password for basic auth, or the API token
    #[serde(default)]
    pub auth_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositoryConfig {
    pub fn is_configured(&self) -> bool {
        !self.repo_url.is_empty()
    }

    /// Credentials to attach to repository requests
    pub fn credentials(&self) -> Credentials {
        match self.auth_method {
            AuthMethod::None => Credentials::None,
            AuthMethod::Basic => Credentials::Basic {
                username: self.auth_username.clone(),
                secret: self.auth_password.clone(),
            },
            AuthMethod::Token => Credentials::Token {
                secret: self.auth_password.clone(),
            },
        }
    }

    /// Build a config from unsanitized settings input
    pub fn from_raw(raw: &RawOptions) -> Self {
        Self {
            repo_url: raw.repo_url.as_deref().map(sanitize_url).unwrap_or_default(),
            auth_method: raw
                .auth_method
                .as_deref()
                .map(AuthMethod::from_raw)
                .unwrap_or_default(),
            auth_username: raw
                .auth_username
                .as_deref()
                .map(sanitize_text_field)
                .unwrap_or_default(),
            auth_password: raw
                .auth_password
                .as_deref()
                .map(sanitize_text_field)
                .unwrap_or_default(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Copy with the secret masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.auth_password.is_empty() {
            copy.auth_password = "********".to_string();
        }
        copy
    }
}

/// Settings as submitted, before sanitization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOptions {
    pub repo_url: Option<String>,
    pub auth_method: Option<String>,
    pub auth_username: Option<String>,
    pub auth_password: Option<String>,
}

/// Persistence for per-scope repository settings
#[async_trait]
pub trait OptionsStore: Send + Sync {
    /// Read the stored record, `None` if the scope has never been written
    async fn load_record(&self, scope: TenantScope) -> Result<Option<RepositoryConfig>>;

    /// Replace the stored record
    async fn store_record(&self, scope: TenantScope, config: &RepositoryConfig) -> Result<()>;

    /// Current settings for a scope, defaults if unset
    async fn load(&self, scope: TenantScope) -> Result<RepositoryConfig> {
        Ok(self.load_record(scope).await?.unwrap_or_default())
    }

    /// Sanitize and persist submitted settings
    async fn save(&self, scope: TenantScope, raw: &RawOptions) -> Result<RepositoryConfig> {
        let config = RepositoryConfig::from_raw(raw);
        let submitted_url = raw.repo_url.as_deref().is_some_and(|u| !u.trim().is_empty());
        if submitted_url && config.repo_url.is_empty() {
            tracing::warn!(%scope, "rejected repository URL, storing empty value");
        }
        self.store_record(scope, &config).await?;
        tracing::info!(%scope, auth_method = ?config.auth_method, "repository settings saved");
        Ok(config)
    }

    /// Write the default record if none exists. Returns whether anything was written.
    async fn ensure_defaults(&self, scope: TenantScope) -> Result<bool> {
        if self.load_record(scope).await?.is_some() {
            return Ok(false);
        }
        self.store_record(scope, &RepositoryConfig::default()).await?;
        tracing::debug!(%scope, "initialized default repository settings");
        Ok(true)
    }
}

/// YAML file per scope under the config directory
pub struct FileOptionsStore {
    paths: RepoxPaths,
}

impl FileOptionsStore {
    pub fn new(paths: RepoxPaths) -> Self {
        Self { paths }
    }

    pub fn options_file(&self, scope: TenantScope) -> PathBuf {
        self.paths.options_file(scope)
    }
}

#[async_trait]
impl OptionsStore for FileOptionsStore {
    async fn load_record(&self, scope: TenantScope) -> Result<Option<RepositoryConfig>> {
        let path = self.options_file(scope);

        if !path.exists() {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let config: RepositoryConfig = serde_yaml::from_str(&contents)?;
        Ok(Some(config))
    }

    /// Atomic write: temp file then rename
    async fn store_record(&self, scope: TenantScope, config: &RepositoryConfig) -> Result<()> {
        let path = self.options_file(scope);
        let temp_path = path.with_extension("yaml.tmp");

        self.paths.ensure_dirs().await?;

        let contents = serde_yaml::to_string(config)?;
        tokio::fs::write(&temp_path, &contents).await?;

        // Record holds credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&temp_path, permissions).await?;
        }

        tokio::fs::rename(&temp_path, &path).await?;

        Ok(())
    }
}

/// In-memory store, for embedding and tests
#[derive(Default)]
pub struct MemoryOptionsStore {
    records: Mutex<HashMap<TenantScope, RepositoryConfig>>,
}

impl MemoryOptionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a scope with an already-sanitized record
    pub fn with_record(self, scope: TenantScope, config: RepositoryConfig) -> Self {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(scope, config);
        self
    }
}

#[async_trait]
impl OptionsStore for MemoryOptionsStore {
    async fn load_record(&self, scope: TenantScope) -> Result<Option<RepositoryConfig>> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(records.get(&scope).cloned())
    }

    async fn store_record(&self, scope: TenantScope, config: &RepositoryConfig) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(scope, config.clone());
        Ok(())
    }
}
