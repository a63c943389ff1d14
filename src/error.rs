//! Error types for glmirror

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GitLab API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type alias for glmirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;
