//! Unit tests for the listing catalog service

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::account::{Account, UserRole};
use crate::domain::entities::listing::ListingDraft;
use crate::errors::DomainError;
use crate::repositories::{AccountRepository, MockAccountRepository};
use crate::services::listings::ListingService;

fn draft(name: &str) -> ListingDraft {
    ListingDraft {
        name: name.to_string(),
        description: "desc".to_string(),
        category: "misc".to_string(),
        minimum_bid: 10.0,
        end_time: Utc::now() + Duration::days(7),
    }
}

async fn seller(repo: &MockAccountRepository, email: &str) -> Account {
    repo.create(Account::new(
        email.to_string(),
        "Seller".to_string(),
        "credential".to_string(),
        UserRole::User,
    ))
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_listing_assigns_fresh_id() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "s@example.com").await;

    let a = service.create_listing(owner.id, draft("first")).await.unwrap();
    let b = service.create_listing(owner.id, draft("second")).await.unwrap();

    assert_ne!(a.id, b.id);
    let listings = service.listings_for(owner.id).await.unwrap();
    assert_eq!(listings.len(), 2);
}

#[tokio::test]
async fn test_create_listing_validates_draft() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "s@example.com").await;

    let mut bad = draft("bad");
    bad.minimum_bid = -1.0;

    let result = service.create_listing(owner.id, bad).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_update_listing_preserves_id() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "s@example.com").await;
    let created = service.create_listing(owner.id, draft("old")).await.unwrap();

    let updated = service
        .update_listing(owner.id, created.id, draft("new"))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "new");
}

#[tokio::test]
async fn test_update_unknown_listing_fails() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "s@example.com").await;

    let result = service
        .update_listing(owner.id, Uuid::new_v4(), draft("x"))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_is_scoped_to_owner() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "owner@example.com").await;
    let intruder = seller(&repo, "intruder@example.com").await;
    let created = service.create_listing(owner.id, draft("mine")).await.unwrap();

    let result = service
        .update_listing(intruder.id, created.id, draft("stolen"))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_remove_listing_twice_is_ok() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "s@example.com").await;
    let created = service.create_listing(owner.id, draft("gone")).await.unwrap();

    service.remove_listing(owner.id, created.id).await.unwrap();
    // Second removal of the same id is a no-op, not an error
    service.remove_listing(owner.id, created.id).await.unwrap();

    assert!(service.listings_for(owner.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_browse_feed_excludes_viewer() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "owner@example.com").await;
    let viewer = seller(&repo, "viewer@example.com").await;

    service.create_listing(owner.id, draft("theirs")).await.unwrap();
    service.create_listing(viewer.id, draft("mine")).await.unwrap();

    let feed = service.browse_feed(viewer.id).await.unwrap();

    assert!(feed.iter().all(|s| s.owner_id != viewer.id));
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].listings[0].name, "theirs");
}

#[tokio::test]
async fn test_find_listing_resolves_owner() {
    let repo = Arc::new(MockAccountRepository::new());
    let service = ListingService::new(repo.clone());
    let owner = seller(&repo, "s@example.com").await;
    let created = service.create_listing(owner.id, draft("wanted")).await.unwrap();

    let placement = service.find_listing(created.id).await.unwrap();
    assert_eq!(placement.owner_id, owner.id);

    let missing = service.find_listing(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}
