//! Listing catalog: seller-scoped CRUD and cross-owner lookups.

mod service;

#[cfg(test)]
mod tests;

pub use service::ListingService;
