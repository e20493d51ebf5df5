//! Bid ledger service implementation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::bid::Bid;
use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::bid_detail::BidDetail;
use crate::domain::value_objects::listing_views::ListingPlacement;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;

/// Ledger over the bids embedded in account aggregates.
pub struct BidService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> BidService<R> {
    /// Create a new bid service
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Place or replace a bid on a listing
    ///
    /// Resolves the listing first, then upserts on the (bidder, listing)
    /// pair: a first bid appends to the bidder's sequence, a repeat bid
    /// replaces the amount and timestamp in place. The upsert itself is a
    /// single atomic write, so duplicate submissions cannot append twice.
    ///
    /// No rule compares the amount against the listing minimum or the
    /// current high bid.
    ///
    /// # Returns
    /// * `Ok(Bid)` - The stored bid
    /// * `Err(DomainError::NotFound)` - The listing does not exist
    /// * `Err(DomainError::Validation)` - The amount is not a finite number
    pub async fn place_bid(
        &self,
        bidder_id: Uuid,
        listing_id: Uuid,
        amount: f64,
    ) -> DomainResult<Bid> {
        if !amount.is_finite() {
            return Err(DomainError::Validation {
                message: "Bid amount must be a finite number".to_string(),
            });
        }

        // Existence check only; the listing may still vanish before the
        // write lands, which the read views tolerate.
        let placement = self
            .repo
            .find_listing(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        let bid = self.repo.upsert_bid(Bid::new(bidder_id, listing_id, amount)).await?;

        tracing::info!(
            bidder_id = %bidder_id,
            listing_id = %listing_id,
            owner_id = %placement.owner_id,
            event = "bid_placed",
            "Placed bid"
        );

        Ok(bid)
    }

    /// The seller's bidders view: an own listing plus every bid on it
    ///
    /// # Returns
    /// * `Ok((Listing, Vec<Bid>))` - The listing and all current bids
    /// * `Err(DomainError::NotFound)` - The listing is missing or not owned
    ///   by `owner_id`
    pub async fn bidders_for_listing(
        &self,
        owner_id: Uuid,
        listing_id: Uuid,
    ) -> DomainResult<(Listing, Vec<Bid>)> {
        let listing = match self.repo.find_listing(listing_id).await? {
            Some(placement) if placement.owner_id == owner_id => placement.listing,
            _ => return Err(DomainError::not_found("Listing")),
        };

        let bids = self.repo.bids_for_listing(listing_id).await?;
        Ok((listing, bids))
    }

    /// A buyer's view of one listing together with their own bid on it
    pub async fn listing_for_buyer(
        &self,
        bidder_id: Uuid,
        listing_id: Uuid,
    ) -> DomainResult<(ListingPlacement, Option<Bid>)> {
        let placement = self
            .repo
            .find_listing(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))?;

        let own_bid = self.repo.find_bid(bidder_id, listing_id).await?;
        Ok((placement, own_bid))
    }

    /// The buyer's my-bids view: each bid joined against its listing
    ///
    /// A bid whose listing has been deleted by its seller cannot be joined;
    /// such a row is logged and skipped instead of failing the whole view.
    pub async fn my_bids(&self, bidder_id: Uuid) -> DomainResult<Vec<BidDetail>> {
        let bids = self.repo.bids_for_account(bidder_id).await?;

        let mut details = Vec::with_capacity(bids.len());
        for bid in &bids {
            match self.repo.find_listing(bid.listing_id).await? {
                Some(placement) => details.push(BidDetail::join(bid, &placement.listing)),
                None => {
                    tracing::warn!(
                        bidder_id = %bidder_id,
                        listing_id = %bid.listing_id,
                        event = "dangling_bid_skipped",
                        "Bid references a deleted listing; skipping"
                    );
                }
            }
        }

        Ok(details)
    }
}
