//! Trait for the outbound email collaborator

use async_trait::async_trait;

/// Contract with the external email-delivery collaborator.
///
/// The core renders subject and body; transport, provider retries, and
/// sender identity are the implementation's concern.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send a rendered message to an address
    ///
    /// # Returns
    /// * `Ok(message_id)` - Provider-assigned id of the accepted message
    /// * `Err(reason)` - The message was not accepted
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
}
