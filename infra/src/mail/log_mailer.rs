//! Log-only mailer for development

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use jb_core::services::mail::{WelcomeMailer, WelcomeMessage};

/// Mailer that only records the delivery in the log
#[derive(Debug, Default)]
pub struct LogMailer {
    sent: AtomicU64,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages "sent" so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WelcomeMailer for LogMailer {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<String, String> {
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("log-{}", n);

        info!(
            to = %message.to,
            subject = %message.subject(),
            message_id = %message_id,
            "Welcome mail logged (not delivered)"
        );

        Ok(message_id)
    }
}
