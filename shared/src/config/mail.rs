//! Outbound mail configuration

use serde::{Deserialize, Serialize};

/// Which mail adapter delivers welcome messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Log the delivery instead of sending it
    #[default]
    Log,
    /// Mailgun HTTP API
    Mailgun,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "mock" => Ok(MailProvider::Log),
            "mailgun" => Ok(MailProvider::Mailgun),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// Mail delivery configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub provider: MailProvider,

    /// Mailgun sending domain
    #[serde(default)]
    pub mailgun_domain: String,

    /// Mailgun private API key
    #[serde(default)]
    pub mailgun_api_key: String,

    /// Sender address for outbound mail
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("provider", &self.provider)
            .field("mailgun_domain", &self.mailgun_domain)
            .field("mailgun_api_key", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Log,
            mailgun_domain: String::new(),
            mailgun_api_key: String::new(),
            from_address: default_from_address(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("MAIL_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();

        Self {
            provider,
            mailgun_domain: std::env::var("MAILGUN_DOMAIN").unwrap_or_default(),
            mailgun_api_key: std::env::var("MAILGUN_API_KEY").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM").unwrap_or_else(|_| default_from_address()),
            ..Default::default()
        }
    }

    pub fn is_mailgun_configured(&self) -> bool {
        !self.mailgun_domain.is_empty() && !self.mailgun_api_key.is_empty()
    }
}

fn default_from_address() -> String {
    String::from("BiT Jobs <no-reply@bitjobs.app>")
}

fn default_timeout() -> u64 {
    10
}
