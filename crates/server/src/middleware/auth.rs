//! Optional API key authentication

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ErrorBody;

/// API Key authentication state
///
/// When no key is configured (the default) every request passes, which
/// keeps the public surface unchanged for open deployments.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    fn allows(&self, presented: Option<&str>) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => presented == Some(expected.as_str()),
        }
    }
}

/// Middleware enforcing the `X-API-Key` header on guarded routes
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let auth = request.extensions().get::<ApiKeyAuth>().cloned();

    if let Some(auth) = auth {
        let presented = request
            .headers()
            .get("X-API-Key")
            .and_then(|v| v.to_str().ok());

        if !auth.allows(presented) {
            let body = ErrorBody {
                error: "Invalid or missing API key".to_string(),
            };
            return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        }
    }

    next.run(request).await
}
