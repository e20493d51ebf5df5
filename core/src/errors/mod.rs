//! Domain-specific error types and error handling.

use thiserror::Error;

use bh_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Errors raised by the account verification flows
///
/// These map one-to-one onto user-visible outcomes at the boundary; none of
/// them should crash a request.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Verification token not found or expired")]
    TokenNotFound,

    #[error("Email does not match the account for this token")]
    EmailMismatch,

    #[error("Account has already been verified")]
    AlreadyVerified,

    #[error("Verification email delivery failed")]
    DeliveryFailed,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Concurrent modification of {resource}")]
    ConcurrentModification { resource: String },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to flow-specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Shorthand for a NotFound error over a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether the error is transient and a read-only caller may retry
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Unavailable { .. })
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let code = match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::DuplicateEmail { .. } => error_codes::DUPLICATE_EMAIL,
            DomainError::ConcurrentModification { .. } => error_codes::CONCURRENT_MODIFICATION,
            DomainError::Unavailable { .. } => error_codes::STORAGE_UNAVAILABLE,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Verification(err) => match err {
                VerificationError::TokenNotFound => error_codes::TOKEN_NOT_FOUND,
                VerificationError::EmailMismatch => error_codes::EMAIL_MISMATCH,
                VerificationError::AlreadyVerified => error_codes::ALREADY_VERIFIED,
                VerificationError::DeliveryFailed => error_codes::EMAIL_DELIVERY_ERROR,
            },
        };
        ErrorResponse::new(code, self.to_string())
    }
}

/// Result alias used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;
