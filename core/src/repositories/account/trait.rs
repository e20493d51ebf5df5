//! Account repository trait defining the interface for aggregate persistence.
//!
//! The Account aggregate is the unit of consistency: an account record plus
//! the listing and bid collections it owns. Listings and bids are child
//! entities addressed across aggregates only by their opaque ids, which is
//! why the cross-owner lookups live here next to the single-aggregate
//! operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::bid::Bid;
use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::listing_views::{ListingPlacement, SellerListings};
use crate::errors::DomainError;

/// Repository trait for Account aggregate persistence operations
///
/// Implementations must keep each aggregate internally consistent: a listing
/// or bid mutation is a mutation of its owning account. Cross-aggregate
/// operations (a bid referencing another account's listing) are not
/// transactional; callers handle dangling references.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create a new account
    ///
    /// # Arguments
    /// * `account` - The Account entity to persist
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::DuplicateEmail)` - The email is already registered
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Check if an account exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Set the verified flag on an account
    ///
    /// Idempotent at the storage level: marking an already-verified account
    /// verified again is a no-op.
    ///
    /// # Returns
    /// * `Ok(())` - The account is now verified
    /// * `Err(DomainError::NotFound)` - No account with this id
    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError>;

    /// Append a listing to an owner's listing sequence
    ///
    /// # Returns
    /// * `Ok(Listing)` - The stored listing
    /// * `Err(DomainError::NotFound)` - The owner account does not exist
    async fn insert_listing(&self, owner_id: Uuid, listing: Listing)
        -> Result<Listing, DomainError>;

    /// Replace a listing in place among the owner's listings
    ///
    /// # Returns
    /// * `Ok(Some(Listing))` - The replaced listing
    /// * `Ok(None)` - The listing id is not among the owner's listings
    async fn update_listing(
        &self,
        owner_id: Uuid,
        listing: Listing,
    ) -> Result<Option<Listing>, DomainError>;

    /// Remove a listing from the owner's listings (pull semantics)
    ///
    /// # Returns
    /// * `Ok(true)` - The listing was removed
    /// * `Ok(false)` - The listing was already absent (not an error)
    async fn remove_listing(&self, owner_id: Uuid, listing_id: Uuid)
        -> Result<bool, DomainError>;

    /// Resolve a listing by id across all owners
    ///
    /// Buyers address listings without knowing the owning seller, so this
    /// lookup spans every account's listing collection.
    async fn find_listing(&self, listing_id: Uuid)
        -> Result<Option<ListingPlacement>, DomainError>;

    /// All listings owned by an account, in insertion order
    async fn listings_for(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError>;

    /// Every other account's listings, grouped per owner
    ///
    /// Backs the buyer home feed. Each call runs a fresh query; the result
    /// is a snapshot, not a live cursor.
    async fn listings_excluding(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SellerListings>, DomainError>;

    /// Insert or replace the bid for a (bidder, listing) pair
    ///
    /// The write must be atomic on the pair key: after any number of calls
    /// for the same bidder and listing, at most one bid record exists, and
    /// its amount and timestamp come from the latest call. A repeat bid
    /// keeps the record's position in the bidder's sequence.
    async fn upsert_bid(&self, bid: Bid) -> Result<Bid, DomainError>;

    /// Find a bidder's current bid on a listing, if any
    async fn find_bid(
        &self,
        bidder_id: Uuid,
        listing_id: Uuid,
    ) -> Result<Option<Bid>, DomainError>;

    /// All bids on a listing across every bidder's collection
    async fn bids_for_listing(&self, listing_id: Uuid) -> Result<Vec<Bid>, DomainError>;

    /// All bids owned by an account, in insertion order
    async fn bids_for_account(&self, bidder_id: Uuid) -> Result<Vec<Bid>, DomainError>;
}
