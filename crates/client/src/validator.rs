//! The validation pipeline: build, send, branch on status, parse, aggregate

use std::time::Duration;

use fhir_validator_core::{ParsedOutcome, ValidationResult, parse_operation_outcome};
use serde_json::Value as JsonValue;

use crate::error::ValidationError;
use crate::request::{ResourceInput, ValidateOptions, ValidationRequest};
use crate::transport::{ReqwestTransport, Transport, TransportResponse};

/// Timeout applied when neither the config nor the call sets one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Target server and defaults for a [`Validator`]
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ValidatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validates resources against one remote FHIR server.
///
/// Holds no per-call state; a single instance can serve concurrent
/// validations.
#[derive(Clone)]
pub struct Validator<T = ReqwestTransport> {
    config: ValidatorConfig,
    transport: T,
}

impl Validator<ReqwestTransport> {
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> Validator<T> {
    pub fn with_transport(config: ValidatorConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate a resource. Never fails: every problem is reported in the
    /// returned result's error bucket.
    pub async fn validate(
        &self,
        resource: impl Into<ResourceInput>,
        options: &ValidateOptions,
    ) -> ValidationResult {
        let request = match ValidationRequest::build(
            &self.config.base_url,
            resource.into(),
            options,
            self.config.timeout,
        ) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "Rejected resource before sending");
                return ValidationResult::failure(err.to_string(), None, None);
            }
        };

        tracing::debug!(
            url = %request.url,
            profile = ?request.profile,
            timeout_secs = request.timeout.as_secs_f64(),
            "Sending validation request"
        );

        let resource_type = request.detected_type.clone();
        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %request.url, error = %err, "Validation request failed");
                return ValidationResult::failure(err.to_string(), resource_type, None);
            }
        };

        let status = response.status;
        let (parsed, operation_outcome) = interpret_response(response);
        let result = match parsed {
            Ok(parsed) => ValidationResult::from_parsed(parsed, resource_type, operation_outcome),
            Err(err) => {
                tracing::warn!(status, error = %err, "Validation server response not usable");
                ValidationResult::failure(err.to_string(), resource_type, operation_outcome)
            }
        };

        tracing::info!(
            url = %request.url,
            status,
            valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "Validation completed"
        );

        result
    }
}

/// Branch on the response status. The returned document is the parsed
/// body, kept whenever it was parsed even if interpreting it failed.
pub fn interpret_response(
    response: TransportResponse,
) -> (Result<ParsedOutcome, ValidationError>, Option<JsonValue>) {
    let TransportResponse { status, body } = response;

    match status {
        200 => match serde_json::from_str::<JsonValue>(&body) {
            Ok(document) => (parse_document(&document), Some(document)),
            Err(_) => (Err(ValidationError::InvalidResponse), None),
        },
        400 | 422 => match serde_json::from_str::<JsonValue>(&body) {
            Ok(document) => (parse_document(&document), Some(document)),
            Err(_) => (Err(ValidationError::ValidationFailed { status, body }), None),
        },
        404 => (Err(ValidationError::EndpointNotFound), None),
        _ => (Err(ValidationError::HttpStatus { status, body }), None),
    }
}

fn parse_document(document: &JsonValue) -> Result<ParsedOutcome, ValidationError> {
    Ok(parse_operation_outcome(document)?)
}

/// One-shot validation against `server_url` with a fresh HTTP client
pub async fn validate_fhir_resource(
    resource: impl Into<ResourceInput>,
    server_url: &str,
    resource_type: Option<&str>,
    profile_url: Option<&str>,
    timeout: Option<Duration>,
) -> ValidationResult {
    let validator = Validator::new(ValidatorConfig::new(server_url));
    let options = ValidateOptions {
        resource_type: resource_type.map(str::to_string),
        profile: profile_url.map(str::to_string),
        timeout,
    };
    validator.validate(resource, &options).await
}
