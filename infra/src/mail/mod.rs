//! Mail Service Module
//!
//! Delivers the welcome message sent at employer signup.
//!
//! - **Mailgun**: production delivery over the Mailgun HTTP API
//! - **Log**: writes the delivery to the log for development
//!
//! The temporary password inside the message is never logged.

use async_trait::async_trait;

use jb_core::services::mail::{WelcomeMailer, WelcomeMessage};
use jb_shared::config::{MailConfig, MailProvider};

pub mod log_mailer;
pub mod mailgun;

pub use log_mailer::LogMailer;
pub use mailgun::{MailgunConfig, MailgunMailer};


/// Mailer selected from configuration
pub enum ConfiguredMailer {
    Log(LogMailer),
    Mailgun(MailgunMailer),
}

impl ConfiguredMailer {
    pub fn provider_name(&self) -> &str {
        match self {
            ConfiguredMailer::Log(_) => "log",
            ConfiguredMailer::Mailgun(_) => "mailgun",
        }
    }
}

#[async_trait]
impl WelcomeMailer for ConfiguredMailer {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<String, String> {
        match self {
            ConfiguredMailer::Log(mailer) => mailer.send_welcome(message).await,
            ConfiguredMailer::Mailgun(mailer) => mailer.send_welcome(message).await,
        }
    }
}

/// Create the mailer named by the configuration
///
/// Falls back to [`LogMailer`] when Mailgun is selected but cannot be set up.
pub fn create_mailer(config: &MailConfig) -> ConfiguredMailer {
    match config.provider {
        MailProvider::Log => ConfiguredMailer::Log(LogMailer::new()),
        MailProvider::Mailgun => match MailgunMailer::new(MailgunConfig::from(config)) {
            Ok(mailer) => ConfiguredMailer::Mailgun(mailer),
            Err(e) => {
                tracing::error!("Failed to initialize Mailgun mailer: {}", e);
                tracing::warn!("Falling back to log mailer");
                ConfiguredMailer::Log(LogMailer::new())
            }
        },
    }
}
