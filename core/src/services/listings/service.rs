//! Listing catalog service implementation.

use std::sync::Arc;

use uuid::Uuid;

use bh_shared::validation::Validate;

use crate::domain::entities::listing::{Listing, ListingDraft};
use crate::domain::value_objects::listing_views::{ListingPlacement, SellerListings};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;

/// Catalog of listings over the account aggregates.
///
/// Writes are seller-scoped: a listing is created, replaced, and removed
/// only through its owning account. Reads may span owners, because buyers
/// address a listing by id without knowing its seller.
pub struct ListingService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> ListingService<R> {
    /// Create a new listing service
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a listing for a seller, assigning a fresh id
    ///
    /// # Returns
    /// * `Ok(Listing)` - The stored listing
    /// * `Err(DomainError::Validation)` - The draft is invalid
    /// * `Err(DomainError::NotFound)` - The owner account does not exist
    pub async fn create_listing(
        &self,
        owner_id: Uuid,
        draft: ListingDraft,
    ) -> DomainResult<Listing> {
        draft.validate().map_err(|errors| DomainError::Validation {
            message: errors.to_string(),
        })?;

        let listing = Listing::new(draft);
        let stored = self.repo.insert_listing(owner_id, listing).await?;

        tracing::info!(
            owner_id = %owner_id,
            listing_id = %stored.id,
            event = "listing_created",
            "Created listing"
        );

        Ok(stored)
    }

    /// Replace a listing in place, keeping its id
    ///
    /// # Returns
    /// * `Ok(Listing)` - The replaced listing
    /// * `Err(DomainError::NotFound)` - The listing is not among the owner's
    pub async fn update_listing(
        &self,
        owner_id: Uuid,
        listing_id: Uuid,
        draft: ListingDraft,
    ) -> DomainResult<Listing> {
        draft.validate().map_err(|errors| DomainError::Validation {
            message: errors.to_string(),
        })?;

        let mut listing = match self.repo.find_listing(listing_id).await? {
            Some(placement) if placement.owner_id == owner_id => placement.listing,
            _ => return Err(DomainError::not_found("Listing")),
        };
        listing.apply(draft);

        self.repo
            .update_listing(owner_id, listing)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))
    }

    /// Remove a listing; removing an absent listing is not an error
    pub async fn remove_listing(&self, owner_id: Uuid, listing_id: Uuid) -> DomainResult<()> {
        let removed = self.repo.remove_listing(owner_id, listing_id).await?;

        if removed {
            tracing::info!(
                owner_id = %owner_id,
                listing_id = %listing_id,
                event = "listing_removed",
                "Removed listing"
            );
        }

        Ok(())
    }

    /// Resolve a listing by id across all owners
    pub async fn find_listing(&self, listing_id: Uuid) -> DomainResult<ListingPlacement> {
        self.repo
            .find_listing(listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing"))
    }

    /// A seller's own listings, in insertion order
    pub async fn listings_for(&self, owner_id: Uuid) -> DomainResult<Vec<Listing>> {
        self.repo.listings_for(owner_id).await
    }

    /// The buyer home feed: everyone else's listings, grouped per owner
    pub async fn browse_feed(&self, viewer_id: Uuid) -> DomainResult<Vec<SellerListings>> {
        self.repo.listings_excluding(viewer_id).await
    }
}
