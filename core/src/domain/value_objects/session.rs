//! Session token claims.
//!
//! Wire shape of the payload:
//!
//! ```json
//! { "exp": 1700604800, "iat": 1700000000, "custom": { "user": "<identity>" } }
//! ```

use serde::{Deserialize, Serialize};

/// Custom claim group; `user` is the only member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub user: String,
}

/// Full claim set of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub custom: CustomClaims,
}

impl SessionClaims {
    pub fn new(identity: &str, iat: i64, ttl_seconds: i64) -> Self {
        Self {
            exp: iat + ttl_seconds,
            iat,
            custom: CustomClaims {
                user: identity.to_string(),
            },
        }
    }

    pub fn identity(&self) -> &str {
        &self.custom.user
    }
}

/// A freshly issued, transport-encoded session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedSession {
    /// Token as presented in `Authorization: Bearer <token>`
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}
