use serde::{Deserialize, Serialize};

/// Final result of an install request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    Success { message: String },
    Failure { reason: String },
}

impl InstallOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        InstallOutcome::Success {
            message: message.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        InstallOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success { .. })
    }

    /// Message for the caller, whichever way it went
    pub fn message(&self) -> &str {
        match self {
            InstallOutcome::Success { message } => message,
            InstallOutcome::Failure { reason } => reason,
        }
    }
}

impl From<crate::error::RepoxError> for InstallOutcome {
    fn from(e: crate::error::RepoxError) -> Self {
        InstallOutcome::failure(e.to_string())
    }
}
