pub mod health;
pub mod metrics;
mod validate;

use axum::{Router, http::Uri, routing::post};
use fhir_validator_client::Validator;

use crate::error::AppError;

/// Build FHIR `$validate` routes
pub fn fhir_routes() -> Router<Validator> {
    Router::new()
        .route("/$validate", post(validate::validate))
        .route("/{resource_type}/$validate", post(validate::validate_type))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
