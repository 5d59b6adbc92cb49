//! Health check endpoint

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use fhir_validator_client::Validator;
use serde::Serialize;

/// Timeout for the upstream metadata probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    upstream: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// GET /health - Check that the upstream validation server answers `/metadata`
pub async fn check(State(validator): State<Validator>) -> impl IntoResponse {
    let upstream = validator.config().base_url.clone();

    let reason = match validator.transport().probe(&upstream, PROBE_TIMEOUT).await {
        Ok(status) if (200..300).contains(&status) => None,
        Ok(status) => {
            tracing::error!(status, "Upstream metadata probe returned an error status");
            Some(format!("Validation server returned status {}", status))
        }
        Err(e) => {
            tracing::error!(error = %e, "Upstream metadata probe failed");
            Some(e.to_string())
        }
    };

    let (status, label) = match reason {
        None => (StatusCode::OK, "healthy"),
        Some(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            upstream,
            reason,
        }),
    )
}
