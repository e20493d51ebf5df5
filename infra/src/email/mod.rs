//! Email Service Module
//!
//! This module provides outbound email delivery for account verification
//! mail. It includes a production implementation backed by the SendGrid Web
//! API and a mock implementation for development.
//!
//! ## Features
//!
//! - **SendGrid Support**: Production delivery via the v3 mail/send API
//! - **Mock Implementation**: Log output for development
//! - **Security**: Recipient addresses masked in logs
//!
//! The provider is picked by the composing binary; both implementations
//! satisfy the core's `MailerTrait` contract of
//! `send(to, subject, body) -> message id`.

pub mod mock_mailer;
pub mod sendgrid;

// Re-export commonly used types
pub use mock_mailer::MockMailer;
pub use sendgrid::{SendGridConfig, SendGridMailer};
