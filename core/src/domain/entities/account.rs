//! Account entity representing a registered user in the BidHub marketplace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to an account at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Administrative account with access to admin views only
    Admin,
    /// Regular marketplace account (seller or buyer per session)
    User,
}

/// How a regular account is acting for the current session.
///
/// The choice is made once after login or registration and lives in the
/// session context, never on the persisted account record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Lists products and reviews bids on them
    Seller,
    /// Browses listings and places bids
    Buyer,
}

/// Account entity representing a registered user
///
/// The account is the root aggregate: its listings and bids are child
/// collections owned by it and persisted with it. Credential material is
/// opaque to this crate; verifying it is the job of the external
/// authentication collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Email address, normalized (trimmed, lowercased), unique
    pub email: String,

    /// Display name
    pub name: String,

    /// Opaque credential material managed by the external auth collaborator
    pub credential: String,

    /// Role of the account
    pub role: UserRole,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified Account instance
    pub fn new(email: String, name: String, credential: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            credential,
            role,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Checks if the account is an administrator
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account::new(
            "alice@example.com".to_string(),
            "Alice".to_string(),
            "opaque-credential".to_string(),
            UserRole::User,
        )
    }

    #[test]
    fn test_new_account_defaults() {
        let account = sample_account();

        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.name, "Alice");
        assert_eq!(account.role, UserRole::User);
        assert!(!account.is_verified);
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_verify_account() {
        let mut account = sample_account();

        assert!(!account.is_verified);
        account.verify();
        assert!(account.is_verified);
        assert!(account.updated_at >= account.created_at);
    }

    #[test]
    fn test_is_admin() {
        let mut account = sample_account();
        assert!(!account.is_admin());

        account.role = UserRole::Admin;
        assert!(account.is_admin());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"USER\"");
    }

    #[test]
    fn test_account_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AccountType::Seller).unwrap(),
            "\"seller\""
        );
        assert_eq!(
            serde_json::to_string(&AccountType::Buyer).unwrap(),
            "\"buyer\""
        );
    }
}
