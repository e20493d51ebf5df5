//! In-memory collaborators for integration tests.
//!
//! These fakes store accounts, listings, bids, and tokens in flat tables,
//! the same shape the MySQL implementations use, so the scenarios here
//! exercise the services over storage semantics equivalent to production.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use bh_core::domain::entities::account::Account;
use bh_core::domain::entities::bid::Bid;
use bh_core::domain::entities::listing::Listing;
use bh_core::domain::entities::verification_token::VerificationToken;
use bh_core::domain::value_objects::listing_views::{ListingPlacement, SellerListings};
use bh_core::errors::DomainError;
use bh_core::repositories::{AccountRepository, TokenRepository};
use bh_core::services::verification::MailerTrait;

/// Flat-table account store
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
    listings: Mutex<Vec<(Uuid, Listing)>>,
    bids: Mutex<Vec<Bid>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(DomainError::DuplicateEmail {
                email: account.email.clone(),
            });
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.email == email))
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.verify();
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
        if self.find_by_id(owner_id).await?.is_none() {
            return Err(DomainError::not_found("Account"));
        }
        let mut listings = self.listings.lock().unwrap();
        listings.push((owner_id, listing.clone()));
        Ok(listing)
    }

    async fn update_listing(
        &self,
        owner_id: Uuid,
        listing: Listing,
    ) -> Result<Option<Listing>, DomainError> {
        let mut listings = self.listings.lock().unwrap();
        match listings
            .iter_mut()
            .find(|(owner, l)| *owner == owner_id && l.id == listing.id)
        {
            Some((_, slot)) => {
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
        let mut listings = self.listings.lock().unwrap();
        let before = listings.len();
        listings.retain(|(owner, l)| !(*owner == owner_id && l.id == listing_id));
        Ok(listings.len() < before)
    }

    async fn find_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<ListingPlacement>, DomainError> {
        let listings = self.listings.lock().unwrap();
        Ok(listings
            .iter()
            .find(|(_, l)| l.id == listing_id)
            .map(|(owner, l)| ListingPlacement {
                owner_id: *owner,
                listing: l.clone(),
            }))
    }

    async fn listings_for(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.lock().unwrap();
        Ok(listings
            .iter()
            .filter(|(owner, _)| *owner == owner_id)
            .map(|(_, l)| l.clone())
            .collect())
    }

    async fn listings_excluding(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SellerListings>, DomainError> {
        let listings = self.listings.lock().unwrap();
        let mut grouped: Vec<SellerListings> = Vec::new();
        for (owner, listing) in listings.iter().filter(|(owner, _)| *owner != account_id) {
            match grouped.iter_mut().find(|s| s.owner_id == *owner) {
                Some(group) => group.listings.push(listing.clone()),
                None => grouped.push(SellerListings {
                    owner_id: *owner,
                    listings: vec![listing.clone()],
                }),
            }
        }
        Ok(grouped)
    }

    async fn upsert_bid(&self, bid: Bid) -> Result<Bid, DomainError> {
        let mut bids = self.bids.lock().unwrap();
        match bids
            .iter_mut()
            .find(|b| b.bidder_id == bid.bidder_id && b.listing_id == bid.listing_id)
        {
            Some(existing) => {
                existing.amount = bid.amount;
                existing.placed_at = bid.placed_at;
                Ok(existing.clone())
            }
            None => {
                bids.push(bid.clone());
                Ok(bid)
            }
        }
    }

    async fn find_bid(
        &self,
        bidder_id: Uuid,
        listing_id: Uuid,
    ) -> Result<Option<Bid>, DomainError> {
        let bids = self.bids.lock().unwrap();
        Ok(bids
            .iter()
            .find(|b| b.bidder_id == bidder_id && b.listing_id == listing_id)
            .cloned())
    }

    async fn bids_for_listing(&self, listing_id: Uuid) -> Result<Vec<Bid>, DomainError> {
        let bids = self.bids.lock().unwrap();
        Ok(bids
            .iter()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn bids_for_account(&self, bidder_id: Uuid) -> Result<Vec<Bid>, DomainError> {
        let bids = self.bids.lock().unwrap();
        Ok(bids
            .iter()
            .filter(|b| b.bidder_id == bidder_id)
            .cloned()
            .collect())
    }
}

/// Flat-table token store
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<Vec<VerificationToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenStore {
    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.push(token.clone());
        Ok(token)
    }

    async fn find_by_value(
        &self,
        token_value: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens
            .iter()
            .find(|t| t.token == token_value && !t.is_expired())
            .cloned())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| !t.is_expired());
        Ok((before - tokens.len()) as u64)
    }
}

/// Mailer that records accepted messages
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailerTrait for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(format!("msg-{}", sent.len()))
    }
}
