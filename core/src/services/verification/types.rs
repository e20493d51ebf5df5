//! Types for verification service results

use crate::domain::entities::verification_token::VerificationToken;

/// Result of issuing a token and handing its email to the mailer
#[derive(Debug, Clone)]
pub struct VerificationDelivery {
    /// The token that was issued and stored
    pub token: VerificationToken,

    /// The message id reported by the email provider
    pub message_id: String,
}
