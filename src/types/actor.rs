use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TenantScope;

/// A named permission an actor may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    InstallPlugins,
    InstallThemes,
    ManageNetworkPlugins,
    ManageNetworkThemes,
    ManageOptions,
    ManageNetworkOptions,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::InstallPlugins,
        Capability::InstallThemes,
        Capability::ManageNetworkPlugins,
        Capability::ManageNetworkThemes,
        Capability::ManageOptions,
        Capability::ManageNetworkOptions,
    ];
}

/// The identity on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
    #[serde(default)]
    pub capabilities: HashSet<Capability>,
}

impl Actor {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            capabilities: HashSet::new(),
        }
    }

    /// Actor holding every capability (local operator running the CLI)
    pub fn operator(login: impl Into<String>) -> Self {
        Self::new(login).with_capabilities(Capability::ALL)
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Per-request context: who is asking and in which tenant scope
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: Actor,
    pub scope: TenantScope,
}

impl RequestContext {
    pub fn new(actor: Actor, scope: TenantScope) -> Self {
        Self { actor, scope }
    }
}
