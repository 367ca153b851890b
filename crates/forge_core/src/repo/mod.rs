//! Repository layer for the persisted card collection.
//!
//! # Responsibility
//! - Define the persistence contract used by the card store.
//! - Keep wire-format details out of service code.
//!
//! # Invariants
//! - The collection is persisted as a whole; there are no partial writes.

pub mod card_repo;
