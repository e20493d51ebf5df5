//! Read-side views over listings that cross aggregate boundaries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::listing::Listing;

/// A listing resolved across all owners, together with its owning seller.
///
/// Buyers address listings by id without knowing the seller, so cross-owner
/// lookups return the owner alongside the listing itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPlacement {
    /// Account that owns the listing
    pub owner_id: Uuid,

    /// The listing itself
    pub listing: Listing,
}

/// One seller's listings as shown in the buyer home feed.
///
/// The feed is a fresh, insertion-ordered query per call, not a live cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerListings {
    /// Account that owns the listings
    pub owner_id: Uuid,

    /// The owner's listings in insertion order
    pub listings: Vec<Listing>,
}
