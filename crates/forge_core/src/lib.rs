//! Core domain logic for Forge checklist cards.
//! This crate is the single source of truth for card/item invariants.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod service;

pub use config::StoreConfig;
pub use kv::{KvError, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::Card;
pub use model::item::{parse_quantity_input, Item};
pub use model::text::capitalize_words;
pub use model::ValidationError;
pub use progress::{card_progress, item_shares, CardProgress, ItemShare};
pub use repo::card_repo::{
    CardRepository, KvCardRepository, LoadOutcome, LoadWarning, PersistenceError,
};
pub use service::board::{Board, Effect, Intent};
pub use service::card_store::{CardStore, CardView};
pub use service::edit_session::{EditSession, WorkingCopy};
pub use service::error::{NotFound, ServiceError, ServiceResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
