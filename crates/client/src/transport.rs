//! HTTP transport for `$validate` calls

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::TransportError;
use crate::request::ValidationRequest;

/// Media type for FHIR JSON payloads
pub const FHIR_JSON: &str = "application/fhir+json";

/// Status and body text of a server response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one prepared validation request. Implementations must honor the
/// request timeout and classify network failures into [`TransportError`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &ValidationRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, TLS roots, ...)
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// GET `{base}/metadata` and return the status code
    pub async fn probe(&self, base_url: &str, timeout: Duration) -> Result<u16, TransportError> {
        let url = format!("{}/metadata", base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, FHIR_JSON)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        Ok(response.status().as_u16())
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &ValidationRequest) -> Result<TransportResponse, TransportError> {
        let body = serde_json::to_vec(&request.resource)
            .map_err(|e| TransportError::Other(format!("Failed to encode resource: {}", e)))?;

        let mut builder = self
            .http
            .post(&request.url)
            .header(CONTENT_TYPE, FHIR_JSON)
            .header(ACCEPT, FHIR_JSON)
            .timeout(request.timeout)
            .body(body);

        if let Some(profile) = &request.profile {
            builder = builder.query(&[("profile", profile)]);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        Ok(TransportResponse { status, body })
    }
}

/// Map a reqwest failure onto the transport failure classes
fn classify(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_connect() {
        TransportError::Connect
    } else {
        TransportError::Other(err.to_string())
    }
}
