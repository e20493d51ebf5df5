//! Account service implementation.

use std::sync::Arc;

use uuid::Uuid;

use bh_shared::email::{is_valid_email, mask_email, normalize_email};
use bh_shared::validation::validators;

use crate::domain::entities::account::{Account, UserRole};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;

/// Service for registering and resolving accounts.
///
/// Credential material passes through opaquely; hashing and comparing it is
/// the external authentication collaborator's job.
pub struct AccountService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new account service
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a new, unverified account with the USER role
    ///
    /// The email is normalized before storage so later lookups and the
    /// confirmation-time comparison see one canonical form.
    ///
    /// # Returns
    /// * `Ok(Account)` - The freshly created account
    /// * `Err(DomainError::Validation)` - Malformed email or empty name
    /// * `Err(DomainError::DuplicateEmail)` - The email is already registered
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        credential: String,
    ) -> DomainResult<Account> {
        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Email is not valid".to_string(),
            });
        }
        if !validators::not_empty(name) {
            return Err(DomainError::Validation {
                message: "Name must not be empty".to_string(),
            });
        }

        let email = normalize_email(email);
        if self.repo.exists_by_email(&email).await? {
            return Err(DomainError::DuplicateEmail { email });
        }

        let account = Account::new(email, name.trim().to_string(), credential, UserRole::User);

        // The repository guards the unique email key again, which catches a
        // registration racing past the check above
        let created = self.repo.create(account).await?;

        tracing::info!(
            account_id = %created.id,
            email = %mask_email(&created.email),
            event = "account_registered",
            "Registered new account"
        );

        Ok(created)
    }

    /// Resolve an account by id
    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Account> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))
    }

    /// Resolve an account by email (normalized before lookup)
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Account> {
        self.repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))
    }
}
