//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::bid::Bid;
use crate::domain::entities::listing::Listing;
use crate::domain::value_objects::listing_views::{ListingPlacement, SellerListings};
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// One stored aggregate: the account plus its ordered child collections
#[derive(Debug, Clone)]
struct AccountRecord {
    account: Account,
    listings: Vec<Listing>,
    bids: Vec<Bid>,
}

/// Mock account repository for testing
///
/// Stores whole aggregates in memory. All bid upserts run inside a single
/// write-locked section, so the pair invariant holds even under concurrent
/// callers, matching what the unique pair key gives the MySQL implementation.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, AccountRecord>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|r| r.account.email == account.email)
        {
            return Err(DomainError::DuplicateEmail {
                email: account.email.clone(),
            });
        }

        accounts.insert(
            account.id,
            AccountRecord {
                account: account.clone(),
                listings: Vec::new(),
                bids: Vec::new(),
            },
        );
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).map(|r| r.account.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|r| r.account.email == email)
            .map(|r| r.account.clone()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|r| r.account.email == email))
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&id) {
            Some(record) => {
                record.account.verify();
                Ok(())
            }
            None => Err(DomainError::not_found("Account")),
        }
    }

    async fn insert_listing(
        &self,
        owner_id: Uuid,
        listing: Listing,
    ) -> Result<Listing, DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&owner_id) {
            Some(record) => {
                record.listings.push(listing.clone());
                Ok(listing)
            }
            None => Err(DomainError::not_found("Account")),
        }
    }

    async fn update_listing(
        &self,
        owner_id: Uuid,
        listing: Listing,
    ) -> Result<Option<Listing>, DomainError> {
        let mut accounts = self.accounts.write().await;

        let record = match accounts.get_mut(&owner_id) {
            Some(record) => record,
            None => return Ok(None),
        };

        match record.listings.iter_mut().find(|l| l.id == listing.id) {
            Some(slot) => {
                *slot = listing.clone();
                Ok(Some(listing))
            }
            None => Ok(None),
        }
    }

    async fn remove_listing(
        &self,
        owner_id: Uuid,
        listing_id: Uuid,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;

        let record = match accounts.get_mut(&owner_id) {
            Some(record) => record,
            None => return Ok(false),
        };

        let before = record.listings.len();
        record.listings.retain(|l| l.id != listing_id);
        Ok(record.listings.len() < before)
    }

    async fn find_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<ListingPlacement>, DomainError> {
        let accounts = self.accounts.read().await;

        for record in accounts.values() {
            if let Some(listing) = record.listings.iter().find(|l| l.id == listing_id) {
                return Ok(Some(ListingPlacement {
                    owner_id: record.account.id,
                    listing: listing.clone(),
                }));
            }
        }
        Ok(None)
    }

    async fn listings_for(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(&owner_id)
            .map(|r| r.listings.clone())
            .unwrap_or_default())
    }

    async fn listings_excluding(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SellerListings>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .filter(|r| r.account.id != account_id)
            .map(|r| SellerListings {
                owner_id: r.account.id,
                listings: r.listings.clone(),
            })
            .collect())
    }

    async fn upsert_bid(&self, bid: Bid) -> Result<Bid, DomainError> {
        let mut accounts = self.accounts.write().await;

        let record = match accounts.get_mut(&bid.bidder_id) {
            Some(record) => record,
            None => return Err(DomainError::not_found("Account")),
        };

        // Single locked check-then-write keeps the pair invariant atomic
        match record
            .bids
            .iter_mut()
            .find(|b| b.listing_id == bid.listing_id)
        {
            Some(existing) => {
                existing.amount = bid.amount;
                existing.placed_at = bid.placed_at;
                Ok(existing.clone())
            }
            None => {
                record.bids.push(bid.clone());
                Ok(bid)
            }
        }
    }

    async fn find_bid(
        &self,
        bidder_id: Uuid,
        listing_id: Uuid,
    ) -> Result<Option<Bid>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&bidder_id).and_then(|r| {
            r.bids
                .iter()
                .find(|b| b.listing_id == listing_id)
                .cloned()
        }))
    }

    async fn bids_for_listing(&self, listing_id: Uuid) -> Result<Vec<Bid>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .flat_map(|r| r.bids.iter())
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn bids_for_account(&self, bidder_id: Uuid) -> Result<Vec<Bid>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(&bidder_id)
            .map(|r| r.bids.clone())
            .unwrap_or_default())
    }
}
