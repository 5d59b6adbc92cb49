//! `$validate` handlers forwarding to the upstream validation server

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use fhir_validator_client::{ValidateOptions, ValidationResult, Validator};
use serde::Deserialize;

use crate::error::AppError;

/// Query parameters accepted by the validation endpoints
#[derive(Debug, Deserialize, Default)]
pub struct ValidateParams {
    pub profile: Option<String>,
    /// Upstream timeout in seconds; kept as text so bad values can be
    /// reported as an OperationOutcome
    pub timeout: Option<String>,
}

impl ValidateParams {
    fn into_options(self, resource_type: Option<String>) -> Result<ValidateOptions, AppError> {
        let timeout = self.timeout.as_deref().map(parse_timeout).transpose()?;
        Ok(ValidateOptions {
            resource_type,
            profile: self.profile,
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid timeout '{}': expected a positive number of seconds",
                raw
            ))
        })
}

/// FHIR resource type names are ASCII letters only. The segment is spliced
/// into the upstream URL, so anything else is refused.
fn is_resource_type_name(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_alphabetic())
}

/// POST /fhir/$validate - Validate a resource of any type
pub async fn validate(
    State(validator): State<Validator>,
    Query(params): Query<ValidateParams>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let options = params.into_options(None)?;
    Ok(Json(run(&validator, body, &options).await))
}

/// POST /fhir/{resource_type}/$validate - Validate against a specific resource type
pub async fn validate_type(
    State(validator): State<Validator>,
    Path(resource_type): Path<String>,
    Query(params): Query<ValidateParams>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    if !is_resource_type_name(&resource_type) {
        return Err(AppError::BadRequest(format!(
            "Invalid resource type '{}'",
            resource_type
        )));
    }
    let options = params.into_options(Some(resource_type))?;
    Ok(Json(run(&validator, body, &options).await))
}

async fn run(validator: &Validator, body: String, options: &ValidateOptions) -> ValidationResult {
    let result = validator.validate(body, options).await;

    let outcome = if result.is_valid() { "valid" } else { "invalid" };
    metrics::counter!("fhir_validations_total", "outcome" => outcome).increment(1);

    result
}
