//! Session authentication middleware for protecting API endpoints.
//!
//! Every request behind this gate goes through the core `Authenticator`:
//! the `Authorization` header must carry `Bearer <base64(token)>`, the token
//! must verify, and its identity must resolve to an account. On success an
//! [`AuthContext`] is injected into the request extensions.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use jb_core::domain::value_objects::{Account, AccountKind, Identity};
use jb_core::errors::AuthError;
use jb_core::services::Authenticator;

use crate::handlers::handle_auth_error;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub identity: Identity,
    pub kind: AccountKind,
}

impl AuthContext {
    /// Identity of the caller if it is an employer
    ///
    /// Applicants authenticate but are not allowed on employer routes.
    pub fn employer_identity(&self) -> Result<&Identity, AuthError> {
        match self.kind {
            AccountKind::Employer => Ok(&self.identity),
            AccountKind::Applicant => {
                tracing::debug!(identity = %self.identity, "Applicant rejected on employer route");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}

impl From<Account> for AuthContext {
    fn from(account: Account) -> Self {
        Self {
            identity: account.identity,
            kind: account.kind,
        }
    }
}

/// Session authentication middleware factory
#[derive(Clone)]
pub struct SessionAuth {
    authenticator: Arc<Authenticator>,
}

impl SessionAuth {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
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
        let service = Rc::clone(&self.service);
        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            let header = match authorization_header(&req) {
                Ok(header) => header,
                Err(e) => {
                    return Ok(req.into_response(handle_auth_error(e)).map_into_right_body());
                }
            };

            let account = match authenticator.authenticate(header.as_deref()).await {
                Ok(account) => account,
                Err(e) => {
                    return Ok(req.into_response(handle_auth_error(e)).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext::from(account));

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Raw `Authorization` header value
///
/// A value with bytes outside visible ASCII cannot carry a base64 credential
/// and is reported as `BadRequest`.
fn authorization_header(req: &ServiceRequest) -> Result<Option<String>, AuthError> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };
    value
        .to_str()
        .map(|s| Some(s.to_string()))
        .map_err(|_| AuthError::BadRequest {
            reason: "authorization header is not visible ASCII".to_string(),
        })
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
