//! # REST Errors
//!
//! Maps request failures to HTTP responses with an `{"error": "..."}` body.

use crate::application::error::ExecutionError;
use crate::domain::errors::DomainError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Error returned by REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A best-execution request failed or was rejected.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl ApiError {
    /// Shorthand for a 400 with `message`.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Execution(ExecutionError::invalid_request(message))
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Execution(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::Execution(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
