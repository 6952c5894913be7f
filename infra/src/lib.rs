//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `jb_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL storage for employers and applicants using SQLx
//! - **Mail**: outbound welcome mail (Mailgun over HTTP, or log only)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail module - Welcome mail delivery
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail provider rejected the message
    #[error("Mail service error: {0}")]
    Mail(String),
}
