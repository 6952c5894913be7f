//! Trait for welcome mail delivery

use async_trait::async_trait;
use std::fmt;

/// Message sent to a newly signed-up employer
#[derive(Clone)]
pub struct WelcomeMessage {
    pub to: String,
    pub first_name: String,
    pub temporary_password: String,
}

impl WelcomeMessage {
    pub fn subject(&self) -> String {
        "Welcome to BiT Jobs!".to_string()
    }

    pub fn body(&self) -> String {
        format!(
            "Thank you for joining BiT Jobs, {}!\nYour temporary password is {}",
            self.first_name, self.temporary_password
        )
    }
}

impl fmt::Debug for WelcomeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WelcomeMessage")
            .field("to", &self.to)
            .field("first_name", &self.first_name)
            .field("temporary_password", &"<redacted>")
            .finish()
    }
}

/// Trait for welcome mail integration
#[async_trait]
pub trait WelcomeMailer: Send + Sync {
    /// Deliver the message, returning the provider's message id
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<String, String>;
}
