//! Capability resolution from per-request session state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountType, UserRole};

/// Per-request session snapshot
///
/// Built at the start of each request from the authenticated account (or
/// `anonymous()` when there is none) and dropped with the request. The
/// account type is the session-scoped seller/buyer choice; it is never read
/// from or written to the persisted account record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Id of the authenticated account, if any
    pub account_id: Option<Uuid>,

    /// Role of the authenticated account, if any
    pub role: Option<UserRole>,

    /// Seller/buyer choice made after login, if any
    pub account_type: Option<AccountType>,
}

impl SessionContext {
    /// Context for an unauthenticated request
    pub fn anonymous() -> Self {
        Self {
            account_id: None,
            role: None,
            account_type: None,
        }
    }

    /// Context for a freshly authenticated account, before the seller/buyer
    /// choice is made (login and registration both reset the choice)
    pub fn for_account(account: &Account) -> Self {
        Self {
            account_id: Some(account.id),
            role: Some(account.role),
            account_type: None,
        }
    }

    /// The same context with the seller/buyer choice applied
    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    /// Whether the request carries an authenticated account
    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }
}

/// Capability set a request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Public pages only
    Unauthenticated,
    /// Administrative views only
    Admin,
    /// Listing writes on own listings, bidders view on own listings
    Seller,
    /// Bid placement and read-only listing browsing
    Buyer,
    /// Signed in but the seller/buyer choice has not been made yet;
    /// may only select an account type
    PendingSelection,
}

impl Capability {
    /// Seller capability: create/update/remove own listings
    pub fn can_manage_listings(&self) -> bool {
        matches!(self, Capability::Seller)
    }

    /// Seller capability: view the bidders on an own listing
    pub fn can_view_bidders(&self) -> bool {
        matches!(self, Capability::Seller)
    }

    /// Buyer capability: place and replace bids
    pub fn can_place_bids(&self) -> bool {
        matches!(self, Capability::Buyer)
    }

    /// Buyer capability: browse other accounts' listings
    pub fn can_browse_listings(&self) -> bool {
        matches!(self, Capability::Buyer)
    }

    /// Admin capability: administrative views
    pub fn can_administer(&self) -> bool {
        matches!(self, Capability::Admin)
    }
}

/// Resolves which capability set applies to a request
pub struct AccessGate;

impl AccessGate {
    /// Map a session context onto its capability set
    pub fn resolve(ctx: &SessionContext) -> Capability {
        match (ctx.role, ctx.account_type) {
            (None, _) => Capability::Unauthenticated,
            (Some(UserRole::Admin), _) => Capability::Admin,
            (Some(UserRole::User), Some(AccountType::Seller)) => Capability::Seller,
            (Some(UserRole::User), Some(AccountType::Buyer)) => Capability::Buyer,
            (Some(UserRole::User), None) => Capability::PendingSelection,
        }
    }
}
