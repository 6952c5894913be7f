//! Configuration for the session token codec

use jb_shared::config::JwtConfig;

/// Configuration injected into [`SessionTokenCodec`](super::SessionTokenCodec)
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 signing key; empty disables signing
    pub signing_key: String,
    /// Lifetime of sessions issued at login and signup, in seconds
    pub session_ttl_seconds: i64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("signing_key", &"<redacted>")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .finish()
    }
}

impl TokenConfig {
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            session_ttl_seconds: jb_shared::config::auth::DEFAULT_TOKEN_EXPIRY,
        }
    }

    pub fn with_session_ttl(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            signing_key: config.signing_key.clone(),
            session_ttl_seconds: config.token_expiry,
        }
    }
}
