//! Repox - external package repository client and install orchestrator
//!
//! Repox points a host platform at an external repository of plugins and
//! themes: it stores the repository URL and credentials per tenant scope,
//! searches the repository with the configured auth scheme, and drives the
//! host's own installer for a chosen artifact.

pub mod auth;
pub mod bridge;
pub mod config;
pub mod error;
pub mod policy;
pub mod sanitize;
pub mod services;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use bridge::{HttpRepositoryClient, PackageInstaller, RepositoryClient, WpCliInstaller};
pub use config::{ActivationPolicy, RepoxConfig};
pub use error::{RepoxError, Result};
pub use services::{InstallOrchestrator, RepoxService};
pub use storage::{FileOptionsStore, MemoryOptionsStore, OptionsStore, RepositoryConfig, RepoxPaths};
pub use types::*;
