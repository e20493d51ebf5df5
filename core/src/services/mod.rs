//! Business services containing domain logic and use cases.

pub mod access;
pub mod accounts;
pub mod bids;
pub mod listings;
pub mod verification;

// Re-export commonly used types
pub use access::{AccessGate, Capability, SessionContext};
pub use accounts::AccountService;
pub use bids::BidService;
pub use listings::ListingService;
pub use verification::{
    MailerTrait, VerificationDelivery, VerificationService, VerificationServiceConfig,
};
