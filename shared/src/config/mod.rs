//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - session token signing, API key and password hashing
//! - `database` - MySQL connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `mail` - outbound welcome mail provider
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration; `None` selects the in-memory store
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Outbound mail configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: None,
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let cors = if environment.is_production() {
            CorsConfig::from_env()
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            mail: MailConfig::from_env(),
            cors,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Configuration problems worth reporting at startup
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.auth.jwt.signing_key.is_empty() {
            warnings.push("JWT_SIGNING_KEY is not set; sessions cannot be issued".to_string());
        }
        if self.auth.jwt.token_expiry <= 0 {
            warnings.push(format!(
                "JWT token expiry {} is not positive; sessions cannot be issued",
                self.auth.jwt.token_expiry
            ));
        }
        if !self.auth.hash_cost_in_range() {
            warnings.push(format!(
                "password hash cost {} is outside 4..=31; hashing will fail",
                self.auth.password_hash_cost
            ));
        }
        if self.auth.api_key.is_empty() {
            warnings.push("API_KEY is not set; signup and login will reject every request".to_string());
        }
        if self.database.is_none() {
            warnings.push("DATABASE_URL is not set; using the in-memory store".to_string());
        }
        if self.mail.provider == MailProvider::Mailgun && !self.mail.is_mailgun_configured() {
            warnings.push("MAIL_PROVIDER is mailgun but MAILGUN_DOMAIN/MAILGUN_API_KEY are missing".to_string());
        }
        warnings
    }
}
