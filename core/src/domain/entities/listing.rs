//! Listing entity representing a product put up for auction by a seller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bh_shared::validation::{validators, Validate, ValidationErrors};

/// Listing entity owned by a seller account
///
/// The id is assigned once at creation and never changes; bids in other
/// accounts reference the listing through this id alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier, stable for the lifetime of the listing
    pub id: Uuid,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Product category
    pub category: String,

    /// Minimum bid the seller will accept (non-negative)
    pub minimum_bid: f64,

    /// When the auction for this listing ends
    pub end_time: DateTime<Utc>,
}

/// Seller-supplied listing fields, before an id is assigned
///
/// The same draft shape is used for creation and for in-place updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub minimum_bid: f64,
    pub end_time: DateTime<Utc>,
}

impl Listing {
    /// Creates a new Listing from a draft, assigning a fresh id
    pub fn new(draft: ListingDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            minimum_bid: draft.minimum_bid,
            end_time: draft.end_time,
        }
    }

    /// Replaces the listing's fields in place, preserving its id
    pub fn apply(&mut self, draft: ListingDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.minimum_bid = draft.minimum_bid;
        self.end_time = draft.end_time;
    }

    /// Checks if the auction has ended
    pub fn has_ended(&self) -> bool {
        Utc::now() > self.end_time
    }
}

impl Validate for ListingDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validators::not_empty(&self.name) {
            errors.add_error("name", "must not be empty", "REQUIRED");
        }
        if !validators::non_negative_amount(self.minimum_bid) {
            errors.add_error("minimum_bid", "must be a non-negative amount", "OUT_OF_RANGE");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
