//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management with bounded deadlines
//! - Repository pattern implementations over a normalized schema
//!
//! ## Schema
//!
//! The account aggregate is stored normalized:
//!
//! ```sql
//! CREATE TABLE accounts (
//!     id          CHAR(36)     NOT NULL PRIMARY KEY,
//!     email       VARCHAR(255) NOT NULL,
//!     name        VARCHAR(255) NOT NULL,
//!     credential  TEXT         NOT NULL,
//!     role        VARCHAR(16)  NOT NULL,
//!     is_verified BOOLEAN      NOT NULL DEFAULT FALSE,
//!     created_at  DATETIME(6)  NOT NULL,
//!     updated_at  DATETIME(6)  NOT NULL,
//!     UNIQUE KEY uk_accounts_email (email)
//! );
//!
//! CREATE TABLE listings (
//!     id          CHAR(36)     NOT NULL PRIMARY KEY,
//!     owner_id    CHAR(36)     NOT NULL,
//!     seq         BIGINT       NOT NULL AUTO_INCREMENT,
//!     name        VARCHAR(255) NOT NULL,
//!     description TEXT         NOT NULL,
//!     category    VARCHAR(255) NOT NULL,
//!     minimum_bid DOUBLE       NOT NULL,
//!     end_time    DATETIME(6)  NOT NULL,
//!     UNIQUE KEY uk_listings_seq (seq),
//!     KEY idx_listings_owner (owner_id, seq),
//!     CONSTRAINT fk_listings_owner FOREIGN KEY (owner_id) REFERENCES accounts (id)
//! );
//!
//! CREATE TABLE bids (
//!     bidder_id  CHAR(36)    NOT NULL,
//!     listing_id CHAR(36)    NOT NULL,
//!     seq        BIGINT      NOT NULL AUTO_INCREMENT,
//!     amount     DOUBLE      NOT NULL,
//!     placed_at  DATETIME(6) NOT NULL,
//!     PRIMARY KEY (bidder_id, listing_id),
//!     UNIQUE KEY uk_bids_seq (seq),
//!     KEY idx_bids_listing (listing_id)
//! );
//!
//! CREATE TABLE verification_tokens (
//!     id         CHAR(36)    NOT NULL PRIMARY KEY,
//!     account_id CHAR(36)    NOT NULL,
//!     token_hash CHAR(64)    NOT NULL,
//!     created_at DATETIME(6) NOT NULL,
//!     expires_at DATETIME(6) NOT NULL,
//!     UNIQUE KEY uk_tokens_hash (token_hash),
//!     KEY idx_tokens_expiry (expires_at)
//! );
//! ```
//!
//! The `(bidder_id, listing_id)` primary key is what makes the bid upsert
//! atomic; `seq` columns preserve each aggregate's insertion order; the
//! `listings` primary key doubles as the listing-id-to-owner index that
//! replaces scanning every account.
//!
//! ## Retry policy
//!
//! Read-only lookups retry transient failures (pool timeouts, I/O errors)
//! a bounded number of times. Writes never retry: the insert arm of the bid
//! upsert is not idempotent, and every other write is surfaced to the
//! caller instead of being silently reapplied.

pub mod connection;
pub mod mysql;

use bh_core::errors::DomainError;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlTokenRepository};

/// Bounded retry attempts for read-only lookups
pub(crate) const READ_RETRY_ATTEMPTS: u32 = 2;

/// Delay between read retries in milliseconds
pub(crate) const READ_RETRY_DELAY_MS: u64 = 100;

/// Whether an error is transient and a read-only caller may retry
pub(crate) fn is_transient(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
}

/// Whether an error is an integrity constraint violation (SQLSTATE 23000)
pub(crate) fn is_constraint_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23000")
    )
}

/// Map a SQLx error onto the domain taxonomy
///
/// Transient pool/connection failures become `Unavailable`; everything else
/// is an internal persistence error.
pub(crate) fn map_sqlx_err(context: &str, error: sqlx::Error) -> DomainError {
    if is_transient(&error) {
        DomainError::Unavailable {
            message: format!("{}: {}", context, error),
        }
    } else {
        DomainError::Internal {
            message: format!("{}: {}", context, error),
        }
    }
}
