//! Security middleware for enforcing HTTPS and response security headers.
//!
//! In production, plain HTTP requests are refused unless they come from a
//! trusted proxy reporting `x-forwarded-proto: https`, and every response
//! carries HSTS, nosniff, frame and CSP headers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{HeaderName, HeaderValue},
        StatusCode,
    },
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use jb_shared::{error_codes, Environment, ErrorResponse};

use crate::dto::ErrorResponseExt;

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none';"),
];

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Arc<Vec<String>>,
}

impl SecurityMiddleware {
    /// Creates a security middleware for the given environment
    ///
    /// Trusted proxies are read from the comma separated `TRUSTED_PROXIES`.
    pub fn for_environment(environment: Environment) -> Self {
        let trusted_proxies: Vec<String> = std::env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let middleware = Self {
            enforce_https: environment.is_production(),
            add_security_headers: environment.is_production(),
            trusted_proxies: Arc::new(trusted_proxies),
        };

        tracing::info!(
            enforce_https = middleware.enforce_https,
            add_security_headers = middleware.add_security_headers,
            trusted_proxies = ?middleware.trusted_proxies,
            "Security middleware configured"
        );

        middleware
    }

    /// Adds a trusted proxy to the whitelist
    pub fn with_trusted_proxy(mut self, proxy: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.trusted_proxies).push(proxy.into());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    config: SecurityMiddleware,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
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
        if self.config.enforce_https && !is_secure_request(&req, &self.config.trusted_proxies) {
            tracing::warn!("Insecure request blocked: {} {}", req.method(), req.path());
            let response = ErrorResponse::new(error_codes::BAD_REQUEST, "HTTPS required")
                .to_response(StatusCode::FORBIDDEN);
            let response = req.into_response(response).map_into_right_body();
            return Box::pin(async move { Ok(response) });
        }

        let service = Rc::clone(&self.service);
        let add_security_headers = self.config.add_security_headers;

        Box::pin(async move {
            let mut response = service.call(req).await?.map_into_left_body();
            if add_security_headers {
                let headers = response.headers_mut();
                for (name, value) in SECURITY_HEADERS {
                    headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
                }
            }
            Ok(response)
        })
    }
}

/// Checks if the request is secure (HTTPS, localhost, or a trusted proxy
/// that terminated TLS)
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    let host = conn_info.host();
    if host == "localhost" || host.starts_with("localhost:") || host.starts_with("127.0.0.1") {
        return true;
    }

    let forwarded_https = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|proto| proto == "https")
        .unwrap_or(false);
    let peer = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default();

    forwarded_https && trusted_proxies.iter().any(|p| *p == peer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    fn production() -> SecurityMiddleware {
        SecurityMiddleware {
            enforce_https: true,
            add_security_headers: true,
            trusted_proxies: Arc::new(vec![]),
        }
    }

    #[actix_rt::test]
    async fn test_production_blocks_plain_http_from_remote_host() {
        let app = test::init_service(
            App::new()
                .wrap(production())
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("http://api.example.com/ping")
            .insert_header(("host", "api.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_rt::test]
    async fn test_production_adds_security_headers() {
        let app = test::init_service(
            App::new()
                .wrap(production())
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header(("host", "localhost:7000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[actix_rt::test]
    async fn test_development_passes_through() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Development))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("x-frame-options").is_none());
    }
}
