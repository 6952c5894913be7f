//! Authentication configuration: session signing, API key and password hashing

use serde::{Deserialize, Serialize};

/// Session lifetime used when `JWT_TOKEN_EXPIRY` is not set (168 hours)
pub const DEFAULT_TOKEN_EXPIRY: i64 = 168 * 60 * 60;

/// Default bcrypt cost
pub const DEFAULT_HASH_COST: u32 = 12;

/// Cost range bcrypt accepts
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

/// JWT session token configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC-SHA256 signing key; empty means signing is refused
    pub signing_key: String,

    /// Session token lifetime in seconds
    pub token_expiry: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("signing_key", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a signing key
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            signing_key: std::env::var("JWT_SIGNING_KEY").unwrap_or_default(),
            token_expiry: parse_token_expiry(std::env::var("JWT_TOKEN_EXPIRY").ok()),
        }
    }
}

/// Complete authentication configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Key required by the signup and login endpoints
    #[serde(default)]
    pub api_key: String,

    /// bcrypt cost factor
    #[serde(default = "default_hash_cost")]
    pub password_hash_cost: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt", &self.jwt)
            .field("api_key", &"<redacted>")
            .field("password_hash_cost", &self.password_hash_cost)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            api_key: String::new(),
            password_hash_cost: DEFAULT_HASH_COST,
        }
    }
}

impl AuthConfig {
    pub fn new(jwt: JwtConfig, api_key: impl Into<String>) -> Self {
        Self {
            jwt,
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the bcrypt cost factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            api_key: std::env::var("API_KEY").unwrap_or_default(),
            password_hash_cost: parse_hash_cost(std::env::var("PASSWORD_HASH_COST").ok()),
        }
    }

    /// Whether the cost is one bcrypt will hash with
    pub fn hash_cost_in_range(&self) -> bool {
        (MIN_HASH_COST..=MAX_HASH_COST).contains(&self.password_hash_cost)
    }
}

/// Positive lifetime in seconds, otherwise the default
fn parse_token_expiry(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|seconds| *seconds > 0)
        .unwrap_or(DEFAULT_TOKEN_EXPIRY)
}

/// bcrypt cost within 4..=31, otherwise the default
fn parse_hash_cost(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|cost| (MIN_HASH_COST..=MAX_HASH_COST).contains(cost))
        .unwrap_or(DEFAULT_HASH_COST)
}

fn default_hash_cost() -> u32 {
    DEFAULT_HASH_COST
}
