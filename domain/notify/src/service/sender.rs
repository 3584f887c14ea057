use async_trait::async_trait;

use crate::exception::NotifyResult;

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Port to the SMS gateway.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> NotifyResult<()>;
}

/// Port to the transactional email relay.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> NotifyResult<()>;
}
