//! Integration tests for the listing and bidding lifecycle

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};

use bh_core::domain::entities::account::{Account, UserRole};
use bh_core::domain::entities::listing::ListingDraft;
use bh_core::repositories::AccountRepository;
use bh_core::services::bids::BidService;
use bh_core::services::listings::ListingService;

use common::InMemoryAccountStore;

struct App {
    repo: Arc<InMemoryAccountStore>,
    listings: ListingService<InMemoryAccountStore>,
    bids: BidService<InMemoryAccountStore>,
}

fn app() -> App {
    let repo = Arc::new(InMemoryAccountStore::new());
    App {
        repo: repo.clone(),
        listings: ListingService::new(repo.clone()),
        bids: BidService::new(repo),
    }
}

async fn account(app: &App, email: &str) -> Account {
    app.repo
        .create(Account::new(
            email.to_string(),
            "Test".to_string(),
            "credential".to_string(),
            UserRole::User,
        ))
        .await
        .unwrap()
}

fn draft(name: &str, minimum_bid: f64) -> ListingDraft {
    ListingDraft {
        name: name.to_string(),
        description: "desc".to_string(),
        category: "misc".to_string(),
        minimum_bid,
        end_time: Utc::now() + Duration::days(7),
    }
}

#[tokio::test]
async fn bid_upsert_scenario() {
    let app = app();
    let seller = account(&app, "seller@example.com").await;
    let b1 = account(&app, "b1@example.com").await;
    let b2 = account(&app, "b2@example.com").await;

    // Seller S creates listing L1 with a minimum bid of 10
    let l1 = app
        .listings
        .create_listing(seller.id, draft("L1", 10.0))
        .await
        .unwrap();

    // B1 bids 15: the ledger holds one bid
    app.bids.place_bid(b1.id, l1.id, 15.0).await.unwrap();
    let (_, bids) = app
        .bids
        .bidders_for_listing(seller.id, l1.id)
        .await
        .unwrap();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].amount, 15.0);

    // B1 bids 20: still exactly one bid, with the newer amount
    app.bids.place_bid(b1.id, l1.id, 20.0).await.unwrap();
    let (_, bids) = app
        .bids
        .bidders_for_listing(seller.id, l1.id)
        .await
        .unwrap();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].amount, 20.0);

    // B2 bids 25: two bids now, one per bidder
    app.bids.place_bid(b2.id, l1.id, 25.0).await.unwrap();
    let (_, bids) = app
        .bids
        .bidders_for_listing(seller.id, l1.id)
        .await
        .unwrap();
    assert_eq!(bids.len(), 2);
}

#[tokio::test]
async fn seller_updates_and_removes_listing() {
    let app = app();
    let seller = account(&app, "seller@example.com").await;

    let listing = app
        .listings
        .create_listing(seller.id, draft("Old name", 10.0))
        .await
        .unwrap();

    let updated = app
        .listings
        .update_listing(seller.id, listing.id, draft("New name", 12.0))
        .await
        .unwrap();
    assert_eq!(updated.id, listing.id);
    assert_eq!(updated.name, "New name");

    app.listings.remove_listing(seller.id, listing.id).await.unwrap();
    app.listings.remove_listing(seller.id, listing.id).await.unwrap();

    assert!(app
        .listings
        .listings_for(seller.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleted_listing_drops_out_of_my_bids() {
    let app = app();
    let seller = account(&app, "seller@example.com").await;
    let buyer = account(&app, "buyer@example.com").await;

    let kept = app
        .listings
        .create_listing(seller.id, draft("Kept", 5.0))
        .await
        .unwrap();
    let doomed = app
        .listings
        .create_listing(seller.id, draft("Doomed", 5.0))
        .await
        .unwrap();

    app.bids.place_bid(buyer.id, kept.id, 6.0).await.unwrap();
    app.bids.place_bid(buyer.id, doomed.id, 7.0).await.unwrap();

    // The seller deletes one listing; the buyer's bid on it dangles
    app.listings.remove_listing(seller.id, doomed.id).await.unwrap();

    let details = app.bids.my_bids(buyer.id).await.unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].name, "Kept");

    // The dangling bid record itself still exists in the bidder's aggregate
    let raw = app.repo.bids_for_account(buyer.id).await.unwrap();
    assert_eq!(raw.len(), 2);
}

#[tokio::test]
async fn buyer_feed_and_listing_view() {
    let app = app();
    let seller = account(&app, "seller@example.com").await;
    let buyer = account(&app, "buyer@example.com").await;

    let listing = app
        .listings
        .create_listing(seller.id, draft("Lamp", 5.0))
        .await
        .unwrap();

    let feed = app.listings.browse_feed(buyer.id).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].owner_id, seller.id);

    app.bids.place_bid(buyer.id, listing.id, 9.0).await.unwrap();

    let (placement, own_bid) = app
        .bids
        .listing_for_buyer(buyer.id, listing.id)
        .await
        .unwrap();
    assert_eq!(placement.listing.name, "Lamp");
    assert_eq!(own_bid.map(|b| b.amount), Some(9.0));
}
