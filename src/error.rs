//! Error types for the navigation subsystem.

use thiserror::Error;

/// Storage-level failures raised by the local backend of record.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by the public API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Menu node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid menu structure: {0}")]
    InvalidMenu(String),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Not editing: {0}")]
    NotEditing(String),

    #[error("Permission load failed: {0}")]
    PermissionLoad(String),

    #[error("Backend request failed: {0}")]
    BackendRequest(String),

    #[error("Backend returned HTTP {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// Whether retrying the same operation could succeed without local changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::BackendRequest(_) => true,
            ApiError::BackendStatus { status, .. } => *status >= 500 || *status == 429,
            ApiError::StorageError(StorageError::IoError(_)) => true,
            ApiError::StorageError(StorageError::Database(_)) => true,
            ApiError::PermissionLoad(_) => true,
            _ => false,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::BackendRequest(err.to_string())
    }
}
