//! Bid ledger: upsert placement and the bid read views.
//!
//! A bid lives inside the bidder's aggregate while the listing it targets
//! lives inside the seller's, so nothing ties the two together
//! transactionally. The ledger leans on the repository's atomic pair-keyed
//! upsert for the one-bid-per-listing invariant, and treats a missing
//! listing join as a droppable row rather than a failure.

mod service;

#[cfg(test)]
mod tests;

pub use service::BidService;
