//! Transport encoding of session tokens.
//!
//! Tokens leave the server and come back wrapped in standard, padded
//! base64: `Authorization: Bearer base64(<header>.<payload>.<signature>)`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::AuthError;

/// Wrap a compact token for transport
pub fn encode(token: &str) -> String {
    STANDARD.encode(token.as_bytes())
}

/// Unwrap a bearer credential back into the compact token
pub fn decode(credential: &str) -> Result<String, AuthError> {
    let bytes = STANDARD
        .decode(credential.trim())
        .map_err(|e| AuthError::BadRequest {
            reason: format!("credential is not valid base64: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|_| AuthError::BadRequest {
        reason: "credential is not valid UTF-8".to_string(),
    })
}
