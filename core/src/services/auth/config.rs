//! Configuration for the authentication service

use crate::services::password::DEFAULT_TEMPORARY_PASSWORD_LENGTH;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Length of the temporary password mailed at signup
    pub temporary_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            temporary_password_length: DEFAULT_TEMPORARY_PASSWORD_LENGTH,
        }
    }
}
