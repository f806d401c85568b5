use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoxError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transport(String),

    #[error("Repository returned error: {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid response from repository: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Install(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RepoxError {
    /// Short machine-readable category, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::PermissionDenied(_) => "permission",
            Self::Validation(_) => "validation",
            Self::Transport(_) | Self::HttpStatus { .. } => "transport",
            Self::MalformedResponse(_) => "format",
            Self::Install(_) => "install",
            Self::Storage(_) | Self::Yaml(_) => "storage",
        }
    }
}

impl From<reqwest::Error> for RepoxError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return RepoxError::HttpStatus {
                status: status.as_u16(),
            };
        }
        RepoxError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepoxError>;
