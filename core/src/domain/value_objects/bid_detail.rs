//! Display-ready bid record joined against its referenced listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::bid::Bid;
use crate::domain::entities::listing::Listing;

/// A buyer's bid enriched with the listing it targets.
///
/// Produced by the my-bids view; a bid whose listing has been deleted by its
/// seller cannot be enriched and is skipped rather than failing the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidDetail {
    /// Listing the bid targets
    pub listing_id: Uuid,

    /// Product name from the listing
    pub name: String,

    /// Product category from the listing
    pub category: String,

    /// Product description from the listing
    pub description: String,

    /// When the auction ends
    pub end_time: DateTime<Utc>,

    /// The buyer's current offer
    pub amount: f64,

    /// When the bid was placed or last replaced
    pub placed_at: DateTime<Utc>,
}

impl BidDetail {
    /// Joins a bid with the listing it references
    pub fn join(bid: &Bid, listing: &Listing) -> Self {
        Self {
            listing_id: bid.listing_id,
            name: listing.name.clone(),
            category: listing.category.clone(),
            description: listing.description.clone(),
            end_time: listing.end_time,
            amount: bid.amount,
            placed_at: bid.placed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::listing::ListingDraft;
    use chrono::Duration;

    #[test]
    fn test_join() {
        let listing = Listing::new(ListingDraft {
            name: "Vintage camera".to_string(),
            description: "35mm rangefinder".to_string(),
            category: "photography".to_string(),
            minimum_bid: 50.0,
            end_time: Utc::now() + Duration::days(3),
        });
        let bid = Bid::new(Uuid::new_v4(), listing.id, 75.0);

        let detail = BidDetail::join(&bid, &listing);

        assert_eq!(detail.listing_id, listing.id);
        assert_eq!(detail.name, "Vintage camera");
        assert_eq!(detail.amount, 75.0);
        assert_eq!(detail.end_time, listing.end_time);
    }
}
