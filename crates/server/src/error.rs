//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fhir_validator_core::{IssueType, OperationOutcome};
use thiserror::Error;

/// Errors the gateway reports itself, as opposed to validation findings
/// which are returned inside a `ValidationResult`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    TooManyRequests(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, OperationOutcome::invalid(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, OperationOutcome::not_found(msg)),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                OperationOutcome::error(IssueType::Login, msg),
            ),
            AppError::TooManyRequests(msg) => (
                StatusCode::TOO_MANY_REQUESTS,
                OperationOutcome::error(IssueType::Throttled, msg),
            ),
        };

        (status, Json(outcome)).into_response()
    }
}
