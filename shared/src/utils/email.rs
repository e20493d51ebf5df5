//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check: local part, one @, dotted domain. Full RFC 5322
// acceptance is left to the mail provider.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address for storage and comparison (trim + lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is valid
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for display and logs (e.g. al***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let prefix: String = local.chars().take(2).collect();
            format!("{}***@{}", prefix, domain)
        }
        Some((_, domain)) => format!("***@{}", domain),
        None => "***".to_string(),
    }
}
