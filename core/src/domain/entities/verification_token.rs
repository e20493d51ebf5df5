//! Verification token entity for email-based account verification.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of random bytes in a token value (hex-encoded to 32 characters)
pub const TOKEN_BYTE_LENGTH: usize = 16;

/// Default time-to-live for verification tokens (12 hours)
pub const TOKEN_TTL_HOURS: i64 = 12;

/// Single-use, time-bounded credential mailed to an account holder.
///
/// A token is ISSUED at creation and either consumed by a successful
/// confirmation or silently expires once its TTL elapses; an expired token
/// must be indistinguishable from one that never existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Unique identifier for the token record
    pub id: Uuid,

    /// Account this token verifies (non-owning reference)
    pub account_id: Uuid,

    /// Random opaque value, hex-encoded
    pub token: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Creates a new token for an account with the default 12 hour TTL
    pub fn new(account_id: Uuid) -> Self {
        Self::new_with_ttl(account_id, TOKEN_TTL_HOURS)
    }

    /// Creates a new token with a custom TTL in hours
    pub fn new_with_ttl(account_id: Uuid, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            token: Self::generate_value(),
            created_at: now,
            expires_at: now + Duration::hours(ttl_hours),
        }
    }

    /// Generates a cryptographically random token value
    fn generate_value() -> String {
        let mut bytes = [0u8; TOKEN_BYTE_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_token() {
        let account_id = Uuid::new_v4();
        let token = VerificationToken::new(account_id);

        assert_eq!(token.account_id, account_id);
        assert_eq!(token.token.len(), TOKEN_BYTE_LENGTH * 2);
        assert!(token.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            token.expires_at,
            token.created_at + Duration::hours(TOKEN_TTL_HOURS)
        );
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_values_are_unique() {
        let account_id = Uuid::new_v4();
        let values: HashSet<String> = (0..100)
            .map(|_| VerificationToken::new(account_id).token)
            .collect();

        assert_eq!(values.len(), 100);
    }

    #[test]
    fn test_custom_ttl() {
        let token = VerificationToken::new_with_ttl(Uuid::new_v4(), 1);

        assert_eq!(token.expires_at, token.created_at + Duration::hours(1));
    }

    #[test]
    fn test_expired_token() {
        let mut token = VerificationToken::new(Uuid::new_v4());
        token.expires_at = Utc::now() - Duration::seconds(1);

        assert!(token.is_expired());
        assert_eq!(token.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_time_until_expiration() {
        let token = VerificationToken::new(Uuid::new_v4());

        let remaining = token.time_until_expiration();
        assert!(remaining <= Duration::hours(TOKEN_TTL_HOURS));
        assert!(remaining > Duration::hours(TOKEN_TTL_HOURS - 1));
    }

    #[test]
    fn test_serialization_round_trip() {
        let token = VerificationToken::new(Uuid::new_v4());

        let json = serde_json::to_string(&token).unwrap();
        let deserialized: VerificationToken = serde_json::from_str(&json).unwrap();

        assert_eq!(token, deserialized);
    }
}
