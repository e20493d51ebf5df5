//! MySQL implementation of the AccountRepository trait.
//!
//! The account aggregate is stored across the `accounts`, `listings`, and
//! `bids` tables (schema in the parent module). Single-aggregate writes
//! stay within the owner's rows; the cross-owner lookups ride the listing
//! primary key and the `listing_id` index instead of scanning aggregates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bh_core::domain::entities::account::{Account, UserRole};
use bh_core::domain::entities::bid::Bid;
use bh_core::domain::entities::listing::Listing;
use bh_core::domain::value_objects::listing_views::{ListingPlacement, SellerListings};
use bh_core::errors::DomainError;
use bh_core::repositories::AccountRepository;

use crate::database::{
    is_constraint_violation, is_transient, map_sqlx_err, READ_RETRY_ATTEMPTS, READ_RETRY_DELAY_MS,
};

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn role_to_str(role: UserRole) -> &'static str {
        match role {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }

    fn role_from_str(value: &str) -> Result<UserRole, DomainError> {
        match value {
            "ADMIN" => Ok(UserRole::Admin),
            "USER" => Ok(UserRole::User),
            other => Err(DomainError::Internal {
                message: format!("Unknown account role: {}", other),
            }),
        }
    }

    fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID in {}: {}", column, e),
        })
    }

    fn get<'r, T>(row: &'r MySqlRow, column: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(column).map_err(|e| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        })
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = Self::get(row, "id")?;
        let role: String = Self::get(row, "role")?;

        Ok(Account {
            id: Self::parse_uuid(&id, "accounts.id")?,
            email: Self::get(row, "email")?,
            name: Self::get(row, "name")?,
            credential: Self::get(row, "credential")?,
            role: Self::role_from_str(&role)?,
            is_verified: Self::get(row, "is_verified")?,
            created_at: Self::get::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::get::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    /// Convert a database row to a Listing entity
    fn row_to_listing(row: &MySqlRow) -> Result<Listing, DomainError> {
        let id: String = Self::get(row, "id")?;

        Ok(Listing {
            id: Self::parse_uuid(&id, "listings.id")?,
            name: Self::get(row, "name")?,
            description: Self::get(row, "description")?,
            category: Self::get(row, "category")?,
            minimum_bid: Self::get(row, "minimum_bid")?,
            end_time: Self::get::<DateTime<Utc>>(row, "end_time")?,
        })
    }

    /// Convert a database row to a Bid entity
    fn row_to_bid(row: &MySqlRow) -> Result<Bid, DomainError> {
        let bidder_id: String = Self::get(row, "bidder_id")?;
        let listing_id: String = Self::get(row, "listing_id")?;

        Ok(Bid {
            bidder_id: Self::parse_uuid(&bidder_id, "bids.bidder_id")?,
            listing_id: Self::parse_uuid(&listing_id, "bids.listing_id")?,
            amount: Self::get(row, "amount")?,
            placed_at: Self::get::<DateTime<Utc>>(row, "placed_at")?,
        })
    }

    async fn account_exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?) AS found")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("check account existence", e))?;

        let found: i8 = Self::get(&row, "found")?;
        Ok(found == 1)
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, email, name, credential, role, is_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.name)
            .bind(&account.credential)
            .bind(Self::role_to_str(account.role))
            .bind(account.is_verified)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(account),
            // The unique email key catches racing registrations
            Err(e) if is_constraint_violation(&e) => Err(DomainError::DuplicateEmail {
                email: account.email.clone(),
            }),
            Err(e) => Err(map_sqlx_err("create account", e)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, name, credential, role, is_verified, created_at, updated_at
            FROM accounts
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("find account by id", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, name, credential, role, is_verified, created_at, updated_at
            FROM accounts
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("find account by email", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("check email existence", e))?;

        let found: i8 = Self::get(&row, "found")?;
        Ok(found == 1)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE accounts SET is_verified = TRUE, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("mark account verified", e))?;

        // MySQL reports zero affected rows for a value-unchanged update, so
        // only a missing row is an error
        if result.rows_affected() == 0 && !self.account_exists(id).await? {
            return Err(DomainError::not_found("Account"));
        }
        Ok(())
    }

    async fn insert_listing(
        &self,
        owner_id: Uuid,
        listing: Listing,
    ) -> Result<Listing, DomainError> {
        let query = r#"
            INSERT INTO listings (
                id, owner_id, name, description, category, minimum_bid, end_time
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(listing.id.to_string())
            .bind(owner_id.to_string())
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(&listing.category)
            .bind(listing.minimum_bid)
            .bind(listing.end_time)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(listing),
            // Constraint violation (SQLSTATE 23000); a missing owner row is
            // the usual culprit
            Err(e) if is_constraint_violation(&e) => Err(DomainError::not_found("Account")),
            Err(e) => Err(map_sqlx_err("insert listing", e)),
        }
    }

    async fn update_listing(
        &self,
        owner_id: Uuid,
        listing: Listing,
    ) -> Result<Option<Listing>, DomainError> {
        let exists = sqlx::query("SELECT 1 FROM listings WHERE id = ? AND owner_id = ?")
            .bind(listing.id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("find listing for update", e))?;

        if exists.is_none() {
            return Ok(None);
        }

        let query = r#"
            UPDATE listings
            SET name = ?, description = ?, category = ?, minimum_bid = ?, end_time = ?
            WHERE id = ? AND owner_id = ?
        "#;

        sqlx::query(query)
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(&listing.category)
            .bind(listing.minimum_bid)
            .bind(listing.end_time)
            .bind(listing.id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("update listing", e))?;

        Ok(Some(listing))
    }

    async fn remove_listing(
        &self,
        owner_id: Uuid,
        listing_id: Uuid,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = ? AND owner_id = ?")
            .bind(listing_id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("remove listing", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<ListingPlacement>, DomainError> {
        let query = r#"
            SELECT id, owner_id, name, description, category, minimum_bid, end_time
            FROM listings
            WHERE id = ?
        "#;

        let mut attempt = 0;
        loop {
            let result = sqlx::query(query)
                .bind(listing_id.to_string())
                .fetch_optional(&self.pool)
                .await;

            match result {
                Ok(None) => return Ok(None),
                Ok(Some(row)) => {
                    let owner_id: String = Self::get(&row, "owner_id")?;
                    return Ok(Some(ListingPlacement {
                        owner_id: Self::parse_uuid(&owner_id, "listings.owner_id")?,
                        listing: Self::row_to_listing(&row)?,
                    }));
                }
                Err(e) if is_transient(&e) && attempt < READ_RETRY_ATTEMPTS => {
                    attempt += 1;
                    tracing::warn!(
                        listing_id = %listing_id,
                        attempt,
                        error = %e,
                        "Transient failure resolving listing; retrying"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(READ_RETRY_DELAY_MS))
                        .await;
                }
                Err(e) => return Err(map_sqlx_err("find listing", e)),
            }
        }
    }

    async fn listings_for(&self, owner_id: Uuid) -> Result<Vec<Listing>, DomainError> {
        let query = r#"
            SELECT id, name, description, category, minimum_bid, end_time
            FROM listings
            WHERE owner_id = ?
            ORDER BY seq
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("list own listings", e))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    async fn listings_excluding(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<SellerListings>, DomainError> {
        let query = r#"
            SELECT id, owner_id, name, description, category, minimum_bid, end_time
            FROM listings
            WHERE owner_id <> ?
            ORDER BY owner_id, seq
        "#;

        let rows = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("list buyer feed", e))?;

        // Rows arrive grouped by owner; fold consecutive runs together
        let mut grouped: Vec<SellerListings> = Vec::new();
        for row in &rows {
            let owner_raw: String = Self::get(row, "owner_id")?;
            let owner_id = Self::parse_uuid(&owner_raw, "listings.owner_id")?;
            let listing = Self::row_to_listing(row)?;

            match grouped.last_mut() {
                Some(group) if group.owner_id == owner_id => group.listings.push(listing),
                _ => grouped.push(SellerListings {
                    owner_id,
                    listings: vec![listing],
                }),
            }
        }
        Ok(grouped)
    }

    async fn upsert_bid(&self, bid: Bid) -> Result<Bid, DomainError> {
        // The pair primary key makes this one atomic statement: concurrent
        // submissions for the same (bidder, listing) cannot append twice,
        // the later write simply replaces amount and timestamp
        let query = r#"
            INSERT INTO bids (bidder_id, listing_id, amount, placed_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                amount = VALUES(amount),
                placed_at = VALUES(placed_at)
        "#;

        sqlx::query(query)
            .bind(bid.bidder_id.to_string())
            .bind(bid.listing_id.to_string())
            .bind(bid.amount)
            .bind(bid.placed_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("upsert bid", e))?;

        Ok(bid)
    }

    async fn find_bid(
        &self,
        bidder_id: Uuid,
        listing_id: Uuid,
    ) -> Result<Option<Bid>, DomainError> {
        let query = r#"
            SELECT bidder_id, listing_id, amount, placed_at
            FROM bids
            WHERE bidder_id = ? AND listing_id = ?
        "#;

        let row = sqlx::query(query)
            .bind(bidder_id.to_string())
            .bind(listing_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("find bid", e))?;

        row.as_ref().map(Self::row_to_bid).transpose()
    }

    async fn bids_for_listing(&self, listing_id: Uuid) -> Result<Vec<Bid>, DomainError> {
        let query = r#"
            SELECT bidder_id, listing_id, amount, placed_at
            FROM bids
            WHERE listing_id = ?
            ORDER BY placed_at
        "#;

        let rows = sqlx::query(query)
            .bind(listing_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("list bids for listing", e))?;

        rows.iter().map(Self::row_to_bid).collect()
    }

    async fn bids_for_account(&self, bidder_id: Uuid) -> Result<Vec<Bid>, DomainError> {
        let query = r#"
            SELECT bidder_id, listing_id, amount, placed_at
            FROM bids
            WHERE bidder_id = ?
            ORDER BY seq
        "#;

        let rows = sqlx::query(query)
            .bind(bidder_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("list own bids", e))?;

        rows.iter().map(Self::row_to_bid).collect()
    }
}
