//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from credentia-grant, credentia-store, and
//! credentia-issuance to HTTP status codes. Returns JSON error bodies
//! with a machine-readable code and a human-readable message. Internal
//! error details are logged, never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use credentia_grant::GrantError;
use credentia_issuance::IssueError;
use credentia_store::StoreError;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed before any store write (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication failure — missing or unknown principal (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure — wrong role or no visibility (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current state: duplicate registration, duplicate
    /// pending request, or an invalid grant transition (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // 500-class messages carry internal detail; log them and return
        // a generic message instead.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "internal error serving request");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmailTaken(_)
            | StoreError::StudentEmailTaken(_)
            | StoreError::PendingGrantExists { .. } => Self::Conflict(e.to_string()),
            StoreError::StudentNotFound(_)
            | StoreError::CertificateNotFound(_)
            | StoreError::GrantNotFound(_)
            | StoreError::BlobMissing(_) => Self::NotFound(e.to_string()),
            StoreError::Transition(t) => Self::from(t),
            StoreError::InvalidLocation(_) | StoreError::Io(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<GrantError> for AppError {
    fn from(e: GrantError) -> Self {
        // An out-of-order transition is a conflict with the grant's
        // current state, not a malformed request.
        Self::Conflict(e.to_string())
    }
}

impl From<IssueError> for AppError {
    fn from(e: IssueError) -> Self {
        match e {
            IssueError::StudentNotFound(_) | IssueError::CertificateNotFound(_) => {
                Self::NotFound(e.to_string())
            }
            IssueError::WrongSchool { .. } => Self::Forbidden(e.to_string()),
            IssueError::EmptyFile => Self::Validation(e.to_string()),
            IssueError::DigestMismatch { .. } => Self::Internal(e.to_string()),
            IssueError::Store(s) => Self::from(s),
        }
    }
}
