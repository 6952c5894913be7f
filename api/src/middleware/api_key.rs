//! API key gate for the unauthenticated entry points (signup and login).
//!
//! Clients send `Authorization: Bearer <base64(API_KEY)>`. The decoded key is
//! trimmed and compared with the configured one in constant time. An empty
//! configured key rejects every request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use constant_time_eq::constant_time_eq;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use jb_core::errors::AuthError;
use jb_core::services::BEARER_SCHEME;

use crate::handlers::handle_auth_error;

/// API key middleware factory
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Arc<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if api_key.is_empty() {
            tracing::warn!("API_KEY is empty; signup and login will reject every request");
        }
        Self {
            api_key: Arc::new(api_key),
        }
    }
}

/// Whether the header carries the expected key
fn is_valid_api_key(header: Option<&str>, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }

    let Some((scheme, credential)) = header.and_then(|h| h.trim().split_once(' ')) else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return false;
    }

    let Ok(decoded) = STANDARD.decode(credential.trim()) else {
        return false;
    };
    // Surrounding whitespace in the decoded key is not significant
    match std::str::from_utf8(&decoded) {
        Ok(key) => constant_time_eq(key.trim().as_bytes(), expected.as_bytes()),
        Err(_) => false,
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            api_key: self.api_key.clone(),
        }))
    }
}

/// API key middleware service
pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    api_key: Arc<String>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if !is_valid_api_key(header, &self.api_key) {
            tracing::debug!(path = %req.path(), "Request rejected: invalid API key");
            let response = req
                .into_response(handle_auth_error(AuthError::InvalidApiKey))
                .map_into_right_body();
            return Box::pin(async move { Ok(response) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bearer(key: &str) -> String {
        format!("Bearer {}", STANDARD.encode(key))
    }

    #[test]
    fn test_matching_key_is_accepted() {
        assert!(is_valid_api_key(Some(&bearer("s3cret")), "s3cret"));
        assert!(is_valid_api_key(
            Some(&format!("bearer {}", STANDARD.encode("s3cret"))),
            "s3cret"
        ));
    }

    #[test]
    fn test_wrong_or_malformed_key_is_rejected() {
        assert!(!is_valid_api_key(Some(&bearer("other")), "s3cret"));
        assert!(!is_valid_api_key(Some("Bearer %%%"), "s3cret"));
        assert!(!is_valid_api_key(Some("Basic czNjcmV0"), "s3cret"));
        assert!(!is_valid_api_key(Some("Bearer"), "s3cret"));
        assert!(!is_valid_api_key(None, "s3cret"));
    }

    #[test]
    fn test_decoded_key_is_trimmed() {
        assert!(is_valid_api_key(Some(&bearer("s3cret\n")), "s3cret"));
        assert!(is_valid_api_key(Some(&bearer("  s3cret ")), "s3cret"));
        assert!(!is_valid_api_key(Some(&bearer("s3c ret")), "s3cret"));
    }

    #[test]
    fn test_empty_configured_key_rejects_everything() {
        assert!(!is_valid_api_key(Some(&bearer("")), ""));
    }
}
