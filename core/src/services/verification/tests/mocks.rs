//! Mock mailer for verification service tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::services::verification::traits::MailerTrait;

/// Mock mailer recording every message it accepts
pub struct MockMailer {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    /// Body of the last message sent to an address
    pub fn get_sent_body(&self, to: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(to).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("Email service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(to.to_string(), body.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
