//! Main verification service implementation

use std::sync::Arc;

use bh_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::account::Account;
use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{AccountRepository, TokenRepository};

use super::config::VerificationServiceConfig;
use super::traits::MailerTrait;
use super::types::VerificationDelivery;

/// Subject line of the verification email
const EMAIL_SUBJECT: &str = "Account Verification Token";

/// Verification service coordinating tokens, accounts, and the mailer.
///
/// Tokens are independent of each other: issuing a new one never touches
/// tokens issued earlier, so an account may hold several live tokens, each
/// valid until it expires or the account becomes verified.
pub struct VerificationService<A, T, M>
where
    A: AccountRepository,
    T: TokenRepository,
    M: MailerTrait,
{
    /// Account aggregate store
    account_repo: Arc<A>,
    /// Token store
    token_repo: Arc<T>,
    /// Outbound email collaborator
    mailer: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<A, T, M> VerificationService<A, T, M>
where
    A: AccountRepository,
    T: TokenRepository,
    M: MailerTrait,
{
    /// Create a new verification service
    pub fn new(
        account_repo: Arc<A>,
        token_repo: Arc<T>,
        mailer: Arc<M>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            account_repo,
            token_repo,
            mailer,
            config,
        }
    }

    /// Issue and store a fresh token for an account
    pub async fn issue(&self, account: &Account) -> DomainResult<VerificationToken> {
        let token = VerificationToken::new_with_ttl(account.id, self.config.token_ttl_hours);
        let token = self.token_repo.save(token).await?;

        tracing::info!(
            account_id = %account.id,
            token_id = %token.id,
            event = "token_issued",
            "Issued verification token"
        );

        Ok(token)
    }

    /// Issue a token and hand the rendered verification email to the mailer
    ///
    /// The token is stored before the send is attempted. When delivery
    /// fails the stored token stays behind, so a later resend or a manually
    /// recovered link can still confirm the account.
    pub async fn start_verification(
        &self,
        account: &Account,
    ) -> DomainResult<VerificationDelivery> {
        let token = self.issue(account).await?;
        let body = self.render_email(&token.token);

        match self.mailer.send(&account.email, EMAIL_SUBJECT, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    account_id = %account.id,
                    email = %mask_email(&account.email),
                    message_id = %message_id,
                    event = "verification_email_sent",
                    "Sent verification email"
                );
                Ok(VerificationDelivery { token, message_id })
            }
            Err(reason) => {
                tracing::error!(
                    account_id = %account.id,
                    email = %mask_email(&account.email),
                    reason = %reason,
                    event = "verification_email_failed",
                    "Verification email delivery failed; token remains usable"
                );
                Err(VerificationError::DeliveryFailed.into())
            }
        }
    }

    /// Find a live token by its value
    ///
    /// A token past its TTL behaves exactly like one that never existed.
    pub async fn lookup(&self, token_value: &str) -> DomainResult<VerificationToken> {
        self.token_repo
            .find_by_value(token_value)
            .await?
            .ok_or_else(|| VerificationError::TokenNotFound.into())
    }

    /// Confirm an account through a token and the holder's email address
    ///
    /// Steps, in order: the email must be well-formed; the token must exist
    /// and be unexpired; the account's email must match the provided one;
    /// the account must not already be verified. Only then is the account
    /// marked verified. The token record itself is left in place; replaying
    /// it lands in the already-verified arm.
    pub async fn confirm(
        &self,
        token_value: &str,
        provided_email: &str,
    ) -> DomainResult<Account> {
        if !is_valid_email(provided_email) {
            return Err(DomainError::Validation {
                message: "Email is not valid".to_string(),
            });
        }

        let token = self.lookup(token_value).await?;

        // A token whose account vanished is indistinguishable from a wrong
        // email: both mean "this token is not registered with that address"
        let mut account = match self.account_repo.find_by_id(token.account_id).await? {
            Some(account) => account,
            None => return Err(VerificationError::EmailMismatch.into()),
        };

        if account.email != normalize_email(provided_email) {
            return Err(VerificationError::EmailMismatch.into());
        }

        if account.is_verified {
            return Err(VerificationError::AlreadyVerified.into());
        }

        self.account_repo.mark_verified(account.id).await?;
        account.verify();

        tracing::info!(
            account_id = %account.id,
            token_id = %token.id,
            event = "account_verified",
            "Account verified"
        );

        Ok(account)
    }

    /// Resend a verification email to an unverified account
    ///
    /// Issues a brand-new token; earlier unexpired tokens stay valid.
    pub async fn resend(&self, email: &str) -> DomainResult<VerificationDelivery> {
        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Email is not valid".to_string(),
            });
        }

        let account = self
            .account_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))?;

        if account.is_verified {
            return Err(VerificationError::AlreadyVerified.into());
        }

        self.start_verification(&account).await
    }

    /// Remove expired tokens from storage
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let purged = self.token_repo.purge_expired().await?;
        if purged > 0 {
            tracing::debug!(purged, event = "tokens_purged", "Purged expired tokens");
        }
        Ok(purged)
    }

    /// The confirmation link for a token value
    pub fn confirmation_link(&self, token_value: &str) -> String {
        format!(
            "http://{}/confirmation/{}",
            self.config.public_host, token_value
        )
    }

    fn render_email(&self, token_value: &str) -> String {
        format!(
            "Hello,\n\nPlease verify your account by clicking the link: \n{}",
            self.confirmation_link(token_value)
        )
    }
}
