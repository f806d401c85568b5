//! Request-level services: install orchestration and the actor-facing facade

pub mod install;
pub mod repox_service;

pub use install::{InstallOrchestrator, InstallStage};
pub use repox_service::RepoxService;
