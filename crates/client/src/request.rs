//! Construction of `$validate` requests

use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::error::ValidationError;

/// Name of the FHIR validation operation
pub const VALIDATE_OPERATION: &str = "$validate";

/// A resource as supplied by the caller, either raw JSON text or an
/// already parsed value
#[derive(Debug, Clone)]
pub enum ResourceInput {
    Text(String),
    Json(JsonValue),
}

impl From<String> for ResourceInput {
    fn from(text: String) -> Self {
        ResourceInput::Text(text)
    }
}

impl From<&str> for ResourceInput {
    fn from(text: &str) -> Self {
        ResourceInput::Text(text.to_string())
    }
}

impl From<JsonValue> for ResourceInput {
    fn from(value: JsonValue) -> Self {
        ResourceInput::Json(value)
    }
}

/// Per-call options for a validation
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Overrides the type detected from the resource when building the URL
    pub resource_type: Option<String>,
    /// Profile canonical URL, sent as the `profile` query parameter
    pub profile: Option<String>,
    /// Overrides the validator's configured timeout
    pub timeout: Option<Duration>,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A fully prepared validation call
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub url: String,
    pub profile: Option<String>,
    pub resource: JsonValue,
    /// `resourceType` read from the resource, if it had one
    pub detected_type: Option<String>,
    pub timeout: Duration,
}

impl ValidationRequest {
    /// Prepare a request. Fails only when text input is not valid JSON.
    pub fn build(
        base_url: &str,
        input: ResourceInput,
        options: &ValidateOptions,
        timeout: Duration,
    ) -> Result<Self, ValidationError> {
        let resource = match input {
            ResourceInput::Text(text) => serde_json::from_str(&text)?,
            ResourceInput::Json(value) => value,
        };

        let detected_type = detect_resource_type(&resource);
        let endpoint_type = non_empty(options.resource_type.as_deref())
            .or_else(|| non_empty(detected_type.as_deref()));

        Ok(Self {
            url: validation_url(base_url, endpoint_type),
            profile: non_empty(options.profile.as_deref()).map(str::to_string),
            resource,
            detected_type,
            timeout: options.timeout.unwrap_or(timeout),
        })
    }
}

/// Read the `resourceType` of a JSON object resource
pub fn detect_resource_type(resource: &JsonValue) -> Option<String> {
    resource
        .get("resourceType")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

/// `{base}/{type}/$validate`, or `{base}/$validate` without a type
pub fn validation_url(base_url: &str, resource_type: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match resource_type {
        Some(resource_type) => format!("{}/{}/{}", base, resource_type, VALIDATE_OPERATION),
        None => format!("{}/{}", base, VALIDATE_OPERATION),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
