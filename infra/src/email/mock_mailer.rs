//! Mock email service for development and testing.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use bh_core::services::verification::MailerTrait;
use bh_shared::email::mask_email;

/// A sent message captured by the mock mailer
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock mailer that logs messages instead of delivering them
///
/// Captured messages can be inspected afterwards, which makes this the
/// mailer of choice for development environments and tests.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages accepted so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let message_id = format!("mock-{}", Uuid::new_v4());

        tracing::info!(
            to = %mask_email(to),
            subject = subject,
            message_id = %message_id,
            "Mock mailer accepted message"
        );
        tracing::debug!(body = body, "Mock mailer message body");

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(message_id)
    }
}
