//! SendGrid Email Service Implementation
//!
//! This module provides email delivery through the SendGrid v3 Web API.
//! It implements the core `MailerTrait` for production verification mail.
//!
//! ## Features
//!
//! - Plain-text delivery through the `mail/send` endpoint
//! - Automatic retry with exponential backoff for transient failures
//! - Rate limiting handling (429 responses are retried)
//! - Security: recipient addresses masked in logs

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use bh_core::services::verification::MailerTrait;
use bh_shared::email::{is_valid_email, mask_email};

use crate::InfrastructureError;

/// SendGrid v3 mail/send endpoint
const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid service configuration
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// SendGrid API key
    pub api_key: String,
    /// Verified sender address
    pub from_address: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl SendGridConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_key = std::env::var("SENDGRID_API_KEY")
            .map_err(|_| InfrastructureError::Config("SENDGRID_API_KEY not set".to_string()))?;
        let from_address = std::env::var("SENDGRID_FROM_ADDRESS").map_err(|_| {
            InfrastructureError::Config("SENDGRID_FROM_ADDRESS not set".to_string())
        })?;

        if !is_valid_email(&from_address) {
            return Err(InfrastructureError::Config(
                "SENDGRID_FROM_ADDRESS must be a valid email address".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            from_address,
            max_retries: std::env::var("SENDGRID_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("SENDGRID_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("SENDGRID_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// SendGrid email service implementation
pub struct SendGridMailer {
    client: reqwest::Client,
    config: SendGridConfig,
}

impl SendGridMailer {
    /// Create a new SendGrid mailer
    pub fn new(config: SendGridConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %mask_email(&config.from_address),
            "SendGrid mailer initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = SendGridConfig::from_env()?;
        Self::new(config)
    }

    /// Send a message with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.config.from_address },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });

        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                warn!(
                    to = %mask_email(to),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying SendGrid request"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }

            let response = self
                .client
                .post(SENDGRID_SEND_URL)
                .bearer_auth(&self.config.api_key)
                .json(&payload)
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => {
                    // SendGrid acknowledges with 202 and an X-Message-Id header
                    let message_id = response
                        .headers()
                        .get("x-message-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown")
                        .to_string();

                    debug!(
                        to = %mask_email(to),
                        message_id = %message_id,
                        "SendGrid accepted message"
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    let details = response.text().await.unwrap_or_default();
                    last_error = format!("SendGrid returned {}: {}", status, details);

                    // Retry rate limits and server errors; client errors are final
                    if status.as_u16() != 429 && !status.is_server_error() {
                        error!(to = %mask_email(to), status = %status, "SendGrid rejected message");
                        return Err(InfrastructureError::Email(last_error));
                    }
                }
                Err(e) => {
                    last_error = format!("SendGrid request failed: {}", e);
                }
            }
        }

        error!(to = %mask_email(to), error = %last_error, "SendGrid delivery failed after retries");
        Err(InfrastructureError::Email(last_error))
    }
}

#[async_trait]
impl MailerTrait for SendGridMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        self.send_with_retry(to, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
