//! Error taxonomy for the HTTP layer and its status-code mapping.
//!
//! # Invariants
//! - This is the only place where core errors become status codes.
//! - Store faults never leak detail to clients; they are logged instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cinema_core::{RepoError, ValidationError};
use log::{error, warn};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of a failed API request.
#[derive(Debug)]
pub enum ApiError {
    /// Payload rejected by required-field validation (422).
    ValidationFailed(ValidationError),
    /// No record with the requested id (404).
    NotFound,
    /// Persistence fault of any kind (500).
    Store(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(err) => write!(f, "{err}"),
            Self::NotFound => write!(f, "not found"),
            Self::Store(detail) => write!(f, "store error: {detail}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ValidationFailed(err) => Some(err),
            Self::NotFound | Self::Store(_) => None,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::ValidationFailed(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { .. } => Self::NotFound,
            other => Self::Store(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::ValidationFailed(err) => {
                warn!(
                    "event=validation_failed module=http status={} fields={}",
                    status.as_u16(),
                    err.fields().join(",")
                );
                (
                    status,
                    Json(json!({ "validationErrors": err.violations() })),
                )
                    .into_response()
            }
            Self::NotFound => (status, Json(json!({ "error": "not found" }))).into_response(),
            Self::Store(detail) => {
                error!(
                    "event=store_error module=http status={} error={}",
                    status.as_u16(),
                    detail
                );
                (status, Json(json!({ "error": "internal server error" }))).into_response()
            }
        }
    }
}
