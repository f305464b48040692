//! # Resource Errors
//!
//! Error types for the restservice resource and the directory aggregation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::content::ContentError;
use crate::record_store::StoreError;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Resource errors
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// No record under the requested id
    #[error("Resource not found")]
    NotFound,

    /// Request body rejected at the boundary
    #[error("Invalid request body: {0}")]
    Validation(String),

    // ==================
    // Upstream Errors (5xx)
    // ==================
    /// A content reference points at nothing
    #[error("Broken reference: {0}")]
    BrokenReference(String),

    /// Record store failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    /// Content repository failed
    #[error("Content unavailable: {0}")]
    ContentUnavailable(#[from] ContentError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResourceError::NotFound => StatusCode::NOT_FOUND,
            ResourceError::Validation(_) => StatusCode::BAD_REQUEST,
            ResourceError::BrokenReference(_) => StatusCode::BAD_GATEWAY,
            ResourceError::StorageUnavailable(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
            }
            ResourceError::ContentUnavailable(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
            }
            ResourceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ResourceError> for ErrorResponse {
    fn from(err: ResourceError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 404 carries no body
        if let ResourceError::NotFound = self {
            return status.into_response();
        }

        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
