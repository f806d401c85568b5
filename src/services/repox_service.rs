//! RepoxService - the actor-facing operations
//!
//! - search_plugins / search_themes: permission check, then repository search
//! - install_item: check the request shape, load the scope's settings, then run
//!   the install orchestrator
//! - settings / save_settings: read or replace the scope's repository settings
//!
//! Each call loads the options record for `ctx.scope` fresh, so a settings save
//! is visible to the next request without restarting anything. Errors never
//! escape as faults: searches become `SearchOutcome::Error`, installs become
//! `InstallOutcome::Failure`.

use std::sync::Arc;

use crate::bridge::{HttpRepositoryClient, PackageInstaller, RepositoryClient, WpCliInstaller};
use crate::config::RepoxConfig;
use crate::error::{RepoxError, Result};
use crate::policy;
use crate::sanitize::sanitize_text_field;
use crate::storage::{FileOptionsStore, OptionsStore, RawOptions, RepositoryConfig, RepoxPaths};
use crate::types::{
    InstallOutcome, InstallRequest, ItemKind, RequestContext, SearchOutcome, SearchRequest,
    TenantScope,
};

use super::install::{validate, InstallOrchestrator};

pub struct RepoxService {
    options: Arc<dyn OptionsStore>,
    client: Arc<dyn RepositoryClient>,
    orchestrator: InstallOrchestrator,
}

impl RepoxService {
    pub fn new(
        options: Arc<dyn OptionsStore>,
        client: Arc<dyn RepositoryClient>,
        orchestrator: InstallOrchestrator,
    ) -> Self {
        Self {
            options,
            client,
            orchestrator,
        }
    }

    /// Wire the production stack: YAML options, HTTP client, WP-CLI installer
    pub fn from_config(paths: RepoxPaths, config: &RepoxConfig) -> Result<Self> {
        let options: Arc<dyn OptionsStore> = Arc::new(FileOptionsStore::new(paths));
        let client: Arc<dyn RepositoryClient> =
            Arc::new(HttpRepositoryClient::with_timeout(config.request_timeout())?);
        let installer: Arc<dyn PackageInstaller> =
            Arc::new(WpCliInstaller::from_settings(&config.installer));
        let orchestrator = InstallOrchestrator::new(client.clone(), installer)
            .with_activation_policy(config.activation_policy);

        Ok(Self::new(options, client, orchestrator))
    }

    pub async fn search_plugins(&self, ctx: &RequestContext, query: &str) -> SearchOutcome {
        self.search(ctx, &SearchRequest::new(ItemKind::Plugin, query)).await
    }

    pub async fn search_themes(&self, ctx: &RequestContext, query: &str) -> SearchOutcome {
        self.search(ctx, &SearchRequest::new(ItemKind::Theme, query)).await
    }

    pub async fn search(&self, ctx: &RequestContext, request: &SearchRequest) -> SearchOutcome {
        if !policy::can_search(&ctx.actor, request.kind, ctx.scope) {
            tracing::warn!(actor = %ctx.actor.login, kind = %request.kind, "search denied");
            return SearchOutcome::error(format!(
                "You do not have permission to install {}.",
                request.kind.plural()
            ));
        }

        let query = sanitize_text_field(&request.query);
        let result = match self.options.load(ctx.scope).await {
            Ok(config) => self.client.search(&config, request.kind, &query).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, kind = e.kind(), "search failed");
        }
        SearchOutcome::from(result)
    }

    pub async fn install_item(
        &self,
        ctx: &RequestContext,
        item_type: &str,
        slug: &str,
    ) -> InstallOutcome {
        let request =
            InstallRequest::new(sanitize_text_field(item_type), sanitize_text_field(slug));
        self.install(ctx, &request).await
    }

    pub async fn install(&self, ctx: &RequestContext, request: &InstallRequest) -> InstallOutcome {
        // A malformed request is answered before the settings record is read
        if let Err(reason) = validate(request) {
            tracing::warn!(%reason, "install rejected");
            return InstallOutcome::failure(reason);
        }

        let config = match self.options.load(ctx.scope).await {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "could not load repository settings");
                return InstallOutcome::from(e);
            }
        };
        self.orchestrator.install(ctx, &config, request).await
    }

    /// Current settings for the context's scope, secret masked
    pub async fn settings(&self, ctx: &RequestContext) -> Result<RepositoryConfig> {
        Self::require_settings_access(ctx)?;
        Ok(self.options.load(ctx.scope).await?.redacted())
    }

    /// Sanitize and store new settings for the context's scope
    pub async fn save_settings(
        &self,
        ctx: &RequestContext,
        raw: &RawOptions,
    ) -> Result<RepositoryConfig> {
        Self::require_settings_access(ctx)?;
        let saved = self.options.save(ctx.scope, raw).await?;
        Ok(saved.redacted())
    }

    /// Write empty defaults for a scope that has never been configured
    pub async fn initialize(&self, scope: TenantScope) -> Result<bool> {
        self.options.ensure_defaults(scope).await
    }

    pub async fn is_configured(&self, scope: TenantScope) -> Result<bool> {
        Ok(self.options.load(scope).await?.is_configured())
    }

    fn require_settings_access(ctx: &RequestContext) -> Result<()> {
        if policy::can_manage_settings(&ctx.actor, ctx.scope) {
            Ok(())
        } else {
            Err(RepoxError::PermissionDenied(
                "You do not have permission to manage repository settings.".to_string(),
            ))
        }
    }
}
