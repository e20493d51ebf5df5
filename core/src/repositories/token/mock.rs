//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

use super::trait_::TokenRepository;

/// Mock token repository for testing
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, VerificationToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored tokens, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_value(
        &self,
        token_value: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        // Expired tokens behave exactly like absent ones
        Ok(tokens
            .get(token_value)
            .filter(|t| !t.is_expired())
            .cloned())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired());
        Ok((before - tokens.len()) as u64)
    }
}
