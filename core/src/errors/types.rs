//! Error types for authentication, session tokens and input validation
//!
//! Display strings are for logs. The presentation layer picks the
//! client-facing message, which never says why authentication failed.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing header, bad scheme, bad token, empty identity or unknown account
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The bearer credential could not be transport-decoded
    #[error("Bad request: {reason}")]
    BadRequest { reason: String },

    /// Unknown email or wrong password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The current password given to a password change did not verify
    #[error("Current password does not match")]
    PasswordMismatch,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },

    #[error("Employer already exists")]
    EmployerAlreadyExists,
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    /// Bad signature, wrong algorithm, or `alg: none`
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {reason}")]
    SigningFailed { reason: String },
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", fields.join(", "))]
    RequiredFields { fields: Vec<String> },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Unknown registration step: {value}")]
    UnknownRegistrationStep { value: String },

    #[error("Unknown payment method: {value}")]
    UnknownPaymentMethod { value: String },
}
