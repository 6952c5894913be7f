//! HS256 session token codec

use std::collections::HashSet;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::value_objects::{Identity, IssuedSession, SessionClaims};
use crate::errors::TokenError;

use super::config::TokenConfig;
use super::transport;

const EXPECTED_ALGORITHM: &str = "HS256";

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies signed session tokens carrying one `user` claim
pub struct SessionTokenCodec {
    config: TokenConfig,
    keys: Option<Keys>,
    validation: Validation,
}

impl SessionTokenCodec {
    /// Creates a codec from an explicit signing key
    ///
    /// An empty key yields a codec that refuses to sign and rejects every token.
    pub fn new(config: TokenConfig) -> Self {
        let keys = if config.signing_key.is_empty() {
            tracing::warn!("Session signing key is empty; tokens cannot be issued");
            None
        } else {
            Some(Keys {
                encoding: EncodingKey::from_secret(config.signing_key.as_bytes()),
                decoding: DecodingKey::from_secret(config.signing_key.as_bytes()),
            })
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Self {
            config,
            keys,
            validation,
        }
    }

    /// Lifetime of sessions created by [`issue_session`](Self::issue_session)
    pub fn session_ttl(&self) -> i64 {
        self.config.session_ttl_seconds
    }

    /// Signs a compact token for `identity` valid for `ttl_seconds`
    pub fn issue(&self, identity: &Identity, ttl_seconds: i64) -> Result<String, TokenError> {
        let keys = self.keys.as_ref().ok_or_else(|| TokenError::SigningFailed {
            reason: "signing key is not configured".to_string(),
        })?;

        let claims = SessionClaims::new(identity.as_str(), Utc::now().timestamp(), ttl_seconds);
        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            TokenError::SigningFailed {
                reason: e.to_string(),
            }
        })
    }

    /// Issues a transport-encoded session with the configured lifetime
    ///
    /// A non-positive lifetime is refused; such a token would never verify.
    pub fn issue_session(&self, identity: &Identity) -> Result<IssuedSession, TokenError> {
        if self.config.session_ttl_seconds <= 0 {
            return Err(TokenError::SigningFailed {
                reason: format!(
                    "session lifetime must be positive, got {}",
                    self.config.session_ttl_seconds
                ),
            });
        }
        let token = self.issue(identity, self.config.session_ttl_seconds)?;
        Ok(IssuedSession {
            token: transport::encode(&token),
            expires_in: self.config.session_ttl_seconds,
        })
    }

    /// Verifies a compact token and returns the identity it names
    ///
    /// The identity may be empty; deciding what that means is up to the caller.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_claims(token)
            .map(|claims| Identity::new(claims.custom.user))
    }

    /// Verifies a compact token and returns its full claim set
    pub fn verify_claims(&self, token: &str) -> Result<SessionClaims, TokenError> {
        check_header(token)?;

        let keys = self.keys.as_ref().ok_or(TokenError::InvalidSignature)?;
        let data = decode::<SessionClaims>(token, &keys.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        // A token is expired from its `exp` second onwards.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

/// Rejects anything that is not a three-part HS256 token before it reaches
/// the signature check, including `alg: none`.
fn check_header(token: &str) -> Result<(), TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let raw = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::Malformed)?;
    let header: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some(EXPECTED_ALGORITHM) => Ok(()),
        Some(_) => Err(TokenError::InvalidSignature),
        None => Err(TokenError::Malformed),
    }
}
