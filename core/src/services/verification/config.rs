//! Configuration for the verification service

use crate::domain::entities::verification_token::TOKEN_TTL_HOURS;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of hours before a verification token expires
    pub token_ttl_hours: i64,

    /// Host (and optional port) used in confirmation links,
    /// e.g. `auctions.example.com` or `localhost:5000`
    pub public_host: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: TOKEN_TTL_HOURS,
            public_host: String::from("localhost:5000"),
        }
    }
}
