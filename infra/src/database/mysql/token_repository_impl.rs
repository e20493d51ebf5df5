//! MySQL implementation of the TokenRepository trait.
//!
//! Token values never reach the database in the clear: rows store a SHA-256
//! hash, and lookups hash the presented value before matching. Expiry is
//! enforced in the query itself, so a token past its TTL is indistinguishable
//! from one that never existed; `purge_expired` reclaims the dead rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bh_core::domain::entities::verification_token::VerificationToken;
use bh_core::errors::DomainError;
use bh_core::repositories::TokenRepository;

use crate::database::{is_transient, map_sqlx_err, READ_RETRY_ATTEMPTS, READ_RETRY_DELAY_MS};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token value with SHA-256 for storage and lookup
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let query = r#"
            INSERT INTO verification_tokens (
                id, account_id, token_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.account_id.to_string())
            .bind(Self::hash_token(&token.token))
            .bind(token.created_at)
            .bind(token.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("save verification token", e))?;

        Ok(token)
    }

    async fn find_by_value(
        &self,
        token_value: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let query = r#"
            SELECT id, account_id, created_at, expires_at
            FROM verification_tokens
            WHERE token_hash = ? AND expires_at > ?
        "#;
        let token_hash = Self::hash_token(token_value);

        let mut attempt = 0;
        let row = loop {
            let result = sqlx::query(query)
                .bind(&token_hash)
                .bind(Utc::now())
                .fetch_optional(&self.pool)
                .await;

            match result {
                Ok(row) => break row,
                Err(e) if is_transient(&e) && attempt < READ_RETRY_ATTEMPTS => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        error = %e,
                        "Transient failure looking up verification token; retrying"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(READ_RETRY_DELAY_MS))
                        .await;
                }
                Err(e) => return Err(map_sqlx_err("find verification token", e)),
            }
        };

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let account_id: String = row.try_get("account_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get account_id: {}", e),
        })?;

        // The hash matched, so the presented value is the stored token
        Ok(Some(VerificationToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            account_id: Uuid::parse_str(&account_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            token: token_value.to_string(),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        }))
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("purge expired tokens", e))?;

        Ok(result.rows_affected())
    }
}
