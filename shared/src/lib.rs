//! Shared utilities and common types for the BiT Jobs employer API
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures and error codes
//! - Field validation helpers
//! - Response wrappers for health checks

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, MailConfig, MailProvider, ServerConfig,
};
pub use errors::{error_codes, messages, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, ServiceHealth};
pub use utils::validation;
