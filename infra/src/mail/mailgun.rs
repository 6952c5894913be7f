//! Mailgun mail service implementation
//!
//! Sends messages with a form POST to `<base_url>/<domain>/messages`,
//! authenticated with HTTP basic auth as `api:<key>`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use jb_core::services::mail::{WelcomeMailer, WelcomeMessage};
use jb_shared::config::MailConfig;

use crate::InfrastructureError;

pub const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";

/// Mailgun service configuration
#[derive(Clone)]
pub struct MailgunConfig {
    pub domain: String,
    pub api_key: String,
    pub from_address: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("domain", &self.domain)
            .field("api_key", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl From<&MailConfig> for MailgunConfig {
    fn from(config: &MailConfig) -> Self {
        Self {
            domain: config.mailgun_domain.clone(),
            api_key: config.mailgun_api_key.clone(),
            from_address: config.from_address.clone(),
            base_url: MAILGUN_API_BASE.to_string(),
            request_timeout_secs: config.timeout_seconds,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: String,
}

/// Mailgun mail service
pub struct MailgunMailer {
    client: reqwest::Client,
    config: MailgunConfig,
}

impl MailgunMailer {
    pub fn new(config: MailgunConfig) -> Result<Self, InfrastructureError> {
        if config.domain.is_empty() {
            return Err(InfrastructureError::Config("MAILGUN_DOMAIN not set".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config("MAILGUN_API_KEY not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("Mailgun mailer initialized for domain {}", config.domain);

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.base_url.trim_end_matches('/'),
            self.config.domain
        )
    }

    async fn send(&self, message: &WelcomeMessage) -> Result<String, InfrastructureError> {
        let subject = message.subject();
        let body = message.body();
        let form = [
            ("from", self.config.from_address.as_str()),
            ("to", message.to.as_str()),
            ("subject", subject.as_str()),
            ("text", body.as_str()),
        ];

        debug!(to = %message.to, "Sending welcome mail via Mailgun");

        let response = self
            .client
            .post(self.endpoint())
            .basic_auth("api", Some(&self.config.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(to = %message.to, status = %status, "Mailgun rejected the message");
            return Err(InfrastructureError::Mail(format!(
                "Mailgun responded with {}",
                status
            )));
        }

        let parsed: MailgunResponse = response.json().await?;
        info!(to = %message.to, message_id = %parsed.id, "Welcome mail sent via Mailgun");
        Ok(parsed.id)
    }
}

#[async_trait]
impl WelcomeMailer for MailgunMailer {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<String, String> {
        self.send(message).await.map_err(|e| e.to_string())
    }
}
