//! Authenticates a request from its `Authorization` header.
//!
//! Every request runs through the same stages and stops at the first
//! failure:
//!
//! 1. no header: `Unauthenticated`
//! 2. header present: split scheme and credential, undo the transport
//!    encoding (`BadRequest` if that fails)
//! 3. token decoded: codec verification (`Unauthenticated` on any error)
//! 4. identity claimed: an empty identity is `Unauthenticated`
//! 5. identity resolved: exactly one store lookup confirms the account
//!    still exists
//!
//! Nothing is cached between requests.

use std::sync::Arc;

use crate::domain::value_objects::Account;
use crate::errors::AuthError;
use crate::repositories::AccountRepository;
use crate::services::token::{transport, SessionTokenCodec};

/// Scheme expected in front of the credential
pub const BEARER_SCHEME: &str = "Bearer";

pub struct Authenticator {
    codec: Arc<SessionTokenCodec>,
    accounts: Arc<dyn AccountRepository>,
}

impl Authenticator {
    pub fn new(codec: Arc<SessionTokenCodec>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { codec, accounts }
    }

    /// Resolve the account named by the `Authorization` header value
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Account, AuthError> {
        let header = match authorization.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => {
                tracing::debug!("Rejected request without Authorization header");
                return Err(AuthError::Unauthenticated);
            }
        };

        let (scheme, credential) = header.split_once(' ').unwrap_or((header, ""));
        let credential = credential.trim();
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || credential.is_empty() {
            tracing::debug!(scheme, "Rejected Authorization header with unexpected scheme");
            return Err(AuthError::Unauthenticated);
        }

        let token = transport::decode(credential).map_err(|e| {
            tracing::debug!(error = %e, "Rejected undecodable bearer credential");
            e
        })?;

        let identity = self.codec.verify(&token).map_err(|e| {
            tracing::debug!(reason = %e, "Rejected session token");
            AuthError::Unauthenticated
        })?;

        if identity.is_empty() {
            tracing::debug!("Rejected session token with empty identity");
            return Err(AuthError::Unauthenticated);
        }

        match self.accounts.find_account(&identity).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => {
                tracing::debug!(identity = %identity, "Rejected session for unknown account");
                Err(AuthError::Unauthenticated)
            }
            Err(e) => {
                tracing::error!(identity = %identity, error = %e, "Account lookup failed during authentication");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}
