//! Install orchestration
//!
//! `Validating → AuthorizationChecked → UrlResolved → Installing → Completed`.
//! Every failure is terminal and nothing after the failing stage runs: a
//! rejected request never reaches the repository client or the installer.

use std::sync::Arc;
use tracing::Instrument;

use crate::bridge::{InstallResult, PackageInstaller, RepositoryClient};
use crate::config::ActivationPolicy;
use crate::policy;
use crate::storage::RepositoryConfig;
use crate::types::{InstallOutcome, InstallRequest, ItemKind, RequestContext};

pub const INVALID_TYPE: &str = "invalid type";
pub const INVALID_SLUG: &str = "invalid slug";
pub const PERMISSION_DENIED: &str = "permission denied";
pub const NO_DOWNLOAD_URL: &str = "could not determine download URL";

/// Check the request shape: exact item type, non-blank slug.
///
/// Returns the parsed kind and the trimmed slug, or the failure reason.
pub fn validate(request: &InstallRequest) -> Result<(ItemKind, &str), &'static str> {
    let kind = request
        .item_type
        .parse::<ItemKind>()
        .map_err(|_| INVALID_TYPE)?;
    let slug = request.slug.trim();
    if slug.is_empty() {
        return Err(INVALID_SLUG);
    }
    Ok((kind, slug))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    Validating,
    AuthorizationChecked,
    UrlResolved,
    Installing,
    Completed,
}

pub struct InstallOrchestrator {
    client: Arc<dyn RepositoryClient>,
    installer: Arc<dyn PackageInstaller>,
    activation_policy: ActivationPolicy,
}

impl InstallOrchestrator {
    pub fn new(client: Arc<dyn RepositoryClient>, installer: Arc<dyn PackageInstaller>) -> Self {
        Self {
            client,
            installer,
            activation_policy: ActivationPolicy::default(),
        }
    }

    pub fn with_activation_policy(mut self, policy: ActivationPolicy) -> Self {
        self.activation_policy = policy;
        self
    }

    pub fn activation_policy(&self) -> ActivationPolicy {
        self.activation_policy
    }

    pub async fn install(
        &self,
        ctx: &RequestContext,
        config: &RepositoryConfig,
        request: &InstallRequest,
    ) -> InstallOutcome {
        let span = tracing::info_span!(
            "install",
            actor = %ctx.actor.login,
            scope = %ctx.scope,
            item_type = %request.item_type,
            slug = %request.slug,
        );
        self.run(ctx, config, request).instrument(span).await
    }

    async fn run(
        &self,
        ctx: &RequestContext,
        config: &RepositoryConfig,
        request: &InstallRequest,
    ) -> InstallOutcome {
        let mut stage = InstallStage::Validating;
        tracing::debug!(?stage);

        let (kind, slug) = match validate(request) {
            Ok(valid) => valid,
            Err(reason) => return Self::fail(stage, reason),
        };

        stage = InstallStage::AuthorizationChecked;
        tracing::debug!(?stage);
        if !policy::can_install(&ctx.actor, kind, ctx.scope) {
            return Self::fail(stage, PERMISSION_DENIED);
        }

        stage = InstallStage::UrlResolved;
        let Some(download_url) = self.client.download_url(config, kind, slug) else {
            return Self::fail(stage, NO_DOWNLOAD_URL);
        };
        tracing::debug!(?stage, %download_url);

        stage = InstallStage::Installing;
        tracing::debug!(?stage);
        if let InstallResult::Failed(reason) = self.installer.install(kind, &download_url).await {
            return Self::fail(stage, &reason);
        }

        if let Err(reason) = self.activate_if_network_plugin(ctx, kind, slug).await {
            return Self::fail(stage, &reason);
        }

        stage = InstallStage::Completed;
        tracing::info!(?stage, "{} installed", kind);
        InstallOutcome::success(format!("{} installed successfully.", kind.title()))
    }

    /// Network-activate a freshly installed plugin.
    ///
    /// Only errors when activation was attempted, failed, and the policy is `Required`.
    async fn activate_if_network_plugin(
        &self,
        ctx: &RequestContext,
        kind: ItemKind,
        slug: &str,
    ) -> Result<(), String> {
        if !(ctx.scope.is_network() && kind == ItemKind::Plugin) {
            return Ok(());
        }
        if !policy::can_activate_network_wide(&ctx.actor) {
            tracing::debug!("actor cannot manage network plugins, skipping activation");
            return Ok(());
        }

        match self.installer.activate_network_wide(slug).await {
            Ok(()) => {
                tracing::info!("plugin network-activated");
                Ok(())
            }
            Err(reason) => match self.activation_policy {
                ActivationPolicy::BestEffort => {
                    tracing::warn!(%reason, "network activation failed, install kept");
                    Ok(())
                }
                ActivationPolicy::Required => Err(reason),
            },
        }
    }

    fn fail(stage: InstallStage, reason: &str) -> InstallOutcome {
        tracing::warn!(?stage, %reason, "install failed");
        InstallOutcome::failure(reason)
    }
}
