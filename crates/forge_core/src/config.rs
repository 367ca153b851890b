//! Store configuration.

use crate::model::text::{capitalize_words, Normalizer};
use std::fmt::{Debug, Formatter};

/// Storage key the whole collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "forgeCards";
/// Marker appended to a duplicated card's title.
pub const DEFAULT_COPY_SUFFIX: &str = " (Copy)";

/// Tunables shared by the card store, repository and edit session.
#[derive(Clone)]
pub struct StoreConfig {
    pub storage_key: String,
    pub copy_suffix: String,
    /// Applied to new titles and working item names before validation.
    pub normalizer: Normalizer,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            copy_suffix: DEFAULT_COPY_SUFFIX.to_string(),
            normalizer: capitalize_words,
        }
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("storage_key", &self.storage_key)
            .field("copy_suffix", &self.copy_suffix)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Runs the configured normalizer over trimmed input.
    pub fn normalize(&self, raw: &str) -> String {
        (self.normalizer)(raw.trim())
    }
}
