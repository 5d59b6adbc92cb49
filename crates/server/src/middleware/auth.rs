use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API Key authentication state
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Without a configured key every request is accepted
    fn accepts(&self, presented: Option<&str>) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => presented == Some(expected.as_str()),
        }
    }
}

/// Reject requests to protected routes that lack the configured API key
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    let allowed = request
        .extensions()
        .get::<ApiKeyAuth>()
        .is_none_or(|auth| auth.accepts(presented));

    if !allowed {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
        return AppError::Unauthorized("Invalid or missing API key".to_string()).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::ApiKeyAuth;

    #[test]
    fn key_matching() {
        let open = ApiKeyAuth::new(None);
        assert!(open.accepts(None));

        let locked = ApiKeyAuth::new(Some("secret".into()));
        assert!(locked.accepts(Some("secret")));
        assert!(!locked.accepts(Some("guess")));
        assert!(!locked.accepts(None));
    }
}
