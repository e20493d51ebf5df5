//! Verification status outcomes exposed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Outcome of a registration, confirmation, or resend flow.
///
/// The kebab-case wire form doubles as the status path segment the
/// presentation layer redirects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    /// A verification mail is on its way; the account awaits confirmation
    Pending,
    /// The account was verified before this flow ran
    AlreadyVerified,
    /// The account has just been verified
    Verified,
}

impl VerificationStatus {
    /// The status path segment, e.g. `already-verified`
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::AlreadyVerified => "already-verified",
            VerificationStatus::Verified => "verified",
        }
    }

    /// Parses a status path segment
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "pending" => Some(VerificationStatus::Pending),
            "already-verified" => Some(VerificationStatus::AlreadyVerified),
            "verified" => Some(VerificationStatus::Verified),
            _ => None,
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
