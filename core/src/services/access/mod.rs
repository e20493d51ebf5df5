//! Access gate resolving per-request capability sets.
//!
//! Every request builds a fresh `SessionContext` from the authenticated
//! account; nothing here is shared across requests. The gate maps that
//! context onto one of a fixed set of capabilities, and the boundary layer
//! redirects when a predicate says no.

mod gate;

pub use gate::{AccessGate, Capability, SessionContext};
