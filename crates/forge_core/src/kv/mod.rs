//! Opaque key-value byte storage.
//!
//! # Responsibility
//! - Define the minimal get/set/remove contract the card repository needs.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque bytes; this layer never inspects them.
//! - `set` replaces any previous value for the same key atomically.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage-medium failure.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// The medium refused the operation (e.g. read-only or full).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "key-value store unavailable: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous byte store keyed by string.
pub trait KvStore {
    /// Returns the stored bytes, or `None` when the key is absent.
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> KvResult<()>;
    /// Removes the key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> KvResult<()>;
}
