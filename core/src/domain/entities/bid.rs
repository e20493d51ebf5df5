//! Bid entity placed by a buyer on another account's listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bid entity owned by the bidder's account
///
/// A bid's identity is the (bidder_id, listing_id) pair: a bidder holds at
/// most one bid per listing, and a repeat bid replaces the amount and
/// timestamp of the existing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Account that placed the bid
    pub bidder_id: Uuid,

    /// Listing the bid targets, owned by a different account
    pub listing_id: Uuid,

    /// Offered amount
    pub amount: f64,

    /// When the bid was placed or last replaced
    pub placed_at: DateTime<Utc>,
}

impl Bid {
    /// Creates a new Bid stamped with the current time
    pub fn new(bidder_id: Uuid, listing_id: Uuid, amount: f64) -> Self {
        Self {
            bidder_id,
            listing_id,
            amount,
            placed_at: Utc::now(),
        }
    }

    /// Replaces the offered amount and refreshes the timestamp
    pub fn replace_amount(&mut self, amount: f64) {
        self.amount = amount;
        self.placed_at = Utc::now();
    }
}
