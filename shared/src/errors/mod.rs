//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INVALID_API_KEY: &str = "INVALID_API_KEY";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}

/// Client-facing messages
pub mod messages {
    pub const FRIENDLY_ERROR: &str = "An error occurred, please try again later.";
    pub const INVALID_CREDENTIALS: &str = "Username or password is incorrect.";
    pub const INVALID_API_KEY: &str = "A valid API Key was not supplied.";
    pub const UNAUTHORIZED: &str = "Authorization failed.";
    pub const BAD_REQUEST: &str = "The authorization header could not be decoded.";
    pub const MISSING_REQUIRED_VALUE: &str = "Missing a required value.";
    pub const PASSWORD_MISMATCH: &str = "The current password is incorrect.";
    pub const ALREADY_REGISTERED: &str = "An account with this email already exists.";
    pub const SUCCESS: &str = "Success!";
}
