//! # Modified Resource Responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::record_store::Record;

/// Result of a write operation: a status plus an optional record body
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedResponse {
    pub status: StatusCode,
    pub body: Option<Record>,
}

impl ModifiedResponse {
    /// 201 with the stored record
    pub fn created(record: Record) -> Self {
        Self { status: StatusCode::CREATED, body: Some(record) }
    }

    /// 200 with the merged record
    pub fn updated(record: Record) -> Self {
        Self { status: StatusCode::OK, body: Some(record) }
    }

    /// 204, no body
    pub fn deleted() -> Self {
        Self { status: StatusCode::NO_CONTENT, body: None }
    }
}

impl IntoResponse for ModifiedResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(record) => (self.status, Json(record)).into_response(),
            None => self.status.into_response(),
        }
    }
}
