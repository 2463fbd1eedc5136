use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum FilingLensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FilingLensError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => 2,
            Self::Network(_) | Self::Backend(_) => 3,
            Self::InvalidInput(_) => 4,
            _ => 1,
        }
    }
}

impl From<ApiError> for FilingLensError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(msg) => Self::Network(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}
