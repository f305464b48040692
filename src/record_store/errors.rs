//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Corrupt store file {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::IoError(_) => 503,
            StoreError::Corrupt { .. } => 503,
            StoreError::Serialization(_) => 500,
            StoreError::LockPoisoned => 500,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::IoError(e.to_string())
    }
}
