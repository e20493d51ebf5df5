//! Verification token repository trait.

use async_trait::async_trait;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

/// Repository trait for VerificationToken persistence operations
///
/// # Security Considerations
/// - Token values should be hashed before storage
/// - Expired tokens must never be returned by lookups; a token past its TTL
///   behaves exactly like one that never existed
/// - Expired rows should be periodically purged
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a newly issued verification token
    ///
    /// Issuing never touches other outstanding tokens: an account may hold
    /// several live tokens at once, each independently valid.
    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find a token by its raw value
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - A live (unexpired) token matched
    /// * `Ok(None)` - No token with this value, or it has expired
    async fn find_by_value(
        &self,
        token_value: &str,
    ) -> Result<Option<VerificationToken>, DomainError>;

    /// Delete all expired tokens
    ///
    /// Plays the role of a TTL index sweep; lookups already filter expired
    /// rows, so this only reclaims storage.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of tokens removed
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
