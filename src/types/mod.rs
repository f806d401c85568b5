//! Core types for repox

pub mod actor;
pub mod item;
pub mod outcome;
pub mod request;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use actor::{Actor, Capability, RequestContext};
pub use item::{RepositoryItem, SearchOutcome, SearchResults};
pub use outcome::InstallOutcome;
pub use request::{InstallRequest, SearchRequest};

/// Kind of artifact served by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Plugin,
    Theme,
}

impl ItemKind {
    /// Singular lowercase name (`plugin` / `theme`)
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Plugin => "plugin",
            ItemKind::Theme => "theme",
        }
    }

    /// Plural path segment used by the repository API (`plugins` / `themes`)
    pub fn plural(self) -> &'static str {
        match self {
            ItemKind::Plugin => "plugins",
            ItemKind::Theme => "themes",
        }
    }

    /// Capitalized name for user-facing messages
    pub fn title(self) -> &'static str {
        match self {
            ItemKind::Plugin => "Plugin",
            ItemKind::Theme => "Theme",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    /// Accepts exactly `plugin` or `theme`; no case folding or plurals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plugin" => Ok(ItemKind::Plugin),
            "theme" => Ok(ItemKind::Theme),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

/// Whether configuration and permissions apply to one site or the whole network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantScope {
    #[default]
    SingleSite,
    Network,
}

impl TenantScope {
    pub fn is_network(self) -> bool {
        matches!(self, TenantScope::Network)
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantScope::SingleSite => f.write_str("single_site"),
            TenantScope::Network => f.write_str("network"),
        }
    }
}
