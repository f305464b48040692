//! # Content Errors

use thiserror::Error;

/// Result type for content repository operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Content repository errors
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Content repository unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid content fixture {path}: {reason}")]
    InvalidFixture { path: String, reason: String },

    #[error("Unsupported file URI scheme: {0}")]
    UnsupportedScheme(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl ContentError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ContentError::Unavailable(_) => 503,
            ContentError::InvalidFixture { .. } => 500,
            ContentError::UnsupportedScheme(_) => 500,
            ContentError::IoError(_) => 503,
        }
    }
}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::IoError(e.to_string())
    }
}
