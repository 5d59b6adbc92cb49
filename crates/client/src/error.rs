//! Failure taxonomy of a validation attempt
//!
//! The `Display` text of each variant is the message reported to callers in
//! the result's error bucket.

use std::time::Duration;

use fhir_validator_core::OutcomeError;
use thiserror::Error;

/// Network-level failures, kept apart from HTTP status failures
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to FHIR server timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Could not connect to FHIR server - check URL and network connectivity")]
    Connect,

    #[error("Request to FHIR server failed: {0}")]
    Other(String),
}

/// Reasons a validation attempt produced no usable OperationOutcome
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("FHIR server validation endpoint not found - check server URL and resource type")]
    EndpointNotFound,

    #[error("Server returned invalid JSON response")]
    InvalidResponse,

    #[error("Validation failed with status {status}: {body}")]
    ValidationFailed { status: u16, body: String },

    #[error("FHIR server returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Unexpected error during validation: {0}")]
    Unexpected(String),
}

impl From<OutcomeError> for ValidationError {
    fn from(err: OutcomeError) -> Self {
        ValidationError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_includes_duration() {
        let err = ValidationError::from(TransportError::Timeout(Duration::from_secs(30)));
        assert_eq!(err.to_string(), "Request to FHIR server timed out after 30 seconds");

        let err = TransportError::Timeout(Duration::from_millis(2500));
        assert_eq!(err.to_string(), "Request to FHIR server timed out after 2.5 seconds");
    }

    #[test]
    fn outcome_errors_become_unexpected() {
        let err = ValidationError::from(OutcomeError::InvalidLocation { index: 2 });
        assert_eq!(
            err.to_string(),
            "Unexpected error during validation: issue[2].location must be a list of strings"
        );
    }
}
