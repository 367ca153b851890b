//! Card collection repository over a key-value store.
//!
//! # Responsibility
//! - Encode the full ordered collection into one JSON blob under one key.
//! - Decode it back, salvaging every record that can be salvaged.
//!
//! # Invariants
//! - Wire shape: `[{ title, isDone, items: [{ name, qty, checked }] }]`.
//! - `qty` is a string; `""` means "no quantity" and differs from `"0"`.
//! - Persisted `isDone` is informational; `done` is recomputed on load.
//! - Save writes the whole collection in a single `set`.

use crate::kv::{KvError, KvStore};
use crate::model::card::Card;
use crate::model::item::{parse_quantity_input, Item};
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, PersistenceError>;

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid quantity regex")
});

/// Failure reading or writing the persisted collection.
#[derive(Debug)]
pub enum PersistenceError {
    Kv(KvError),
    Encode(serde_json::Error),
    /// Stored blob is not a JSON array of records.
    Decode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode cards: {err}"),
            Self::Decode(err) => write!(f, "stored cards are unreadable: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<KvError> for PersistenceError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Non-fatal problem found while loading persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Whole card record skipped.
    CardDropped { position: usize, reason: String },
    /// One item skipped; the rest of the card was kept.
    ItemDropped {
        card_position: usize,
        item_position: usize,
        reason: String,
    },
    /// Quantity text could not be used and was treated as absent.
    QuantityIgnored {
        card_position: usize,
        item_position: usize,
        raw: String,
    },
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardDropped { position, reason } => {
                write!(f, "card #{position} dropped: {reason}")
            }
            Self::ItemDropped {
                card_position,
                item_position,
                reason,
            } => write!(
                f,
                "item #{item_position} of card #{card_position} dropped: {reason}"
            ),
            Self::QuantityIgnored {
                card_position,
                item_position,
                raw,
            } => write!(
                f,
                "quantity `{raw}` of item #{item_position} in card #{card_position} ignored"
            ),
        }
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub cards: Vec<Card>,
    pub warnings: Vec<LoadWarning>,
}

/// Persistence contract for the whole card collection.
pub trait CardRepository {
    /// Loads the collection. Absent state yields an empty outcome.
    fn load_cards(&self) -> RepoResult<LoadOutcome>;
    /// Replaces the persisted collection with `cards`.
    fn save_cards(&mut self, cards: &[Card]) -> RepoResult<()>;
    /// Removes persisted state entirely.
    fn clear(&mut self) -> RepoResult<()>;
}

#[derive(Debug, Serialize)]
struct CardRecord {
    title: String,
    #[serde(rename = "isDone")]
    is_done: bool,
    items: Vec<ItemRecord>,
}

#[derive(Debug, Serialize)]
struct ItemRecord {
    name: String,
    qty: String,
    checked: bool,
}

/// Card record as read back; items stay raw so each one is salvaged alone.
#[derive(Debug, Deserialize)]
struct StoredCard {
    title: String,
    #[serde(rename = "isDone", default)]
    is_done: Value,
    #[serde(default)]
    items: Vec<Value>,
}

/// Repository storing the collection as JSON under a single key.
pub struct KvCardRepository<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> KvCardRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KvStore> CardRepository for KvCardRepository<S> {
    fn load_cards(&self) -> RepoResult<LoadOutcome> {
        let Some(bytes) = self.store.get(&self.key)? else {
            debug!("event=cards_load module=repo status=empty key={}", self.key);
            return Ok(LoadOutcome::default());
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("event=cards_load module=repo status=empty key={}", self.key);
            return Ok(LoadOutcome::default());
        }

        let outcome = decode_cards(&bytes).map_err(|err| {
            error!(
                "event=cards_load module=repo status=error key={} error={err}",
                self.key
            );
            err
        })?;
        for warning in &outcome.warnings {
            warn!(
                "event=cards_load module=repo status=degraded key={} warning=\"{warning}\"",
                self.key
            );
        }
        debug!(
            "event=cards_load module=repo status=ok key={} cards={} warnings={}",
            self.key,
            outcome.cards.len(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    fn save_cards(&mut self, cards: &[Card]) -> RepoResult<()> {
        let bytes = encode_cards(cards)?;
        self.store.set(&self.key, &bytes)?;
        debug!(
            "event=cards_save module=repo status=ok key={} cards={} bytes={}",
            self.key,
            cards.len(),
            bytes.len()
        );
        Ok(())
    }

    fn clear(&mut self) -> RepoResult<()> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}

/// Serializes cards into the persisted JSON shape.
pub fn encode_cards(cards: &[Card]) -> RepoResult<Vec<u8>> {
    let records: Vec<CardRecord> = cards.iter().map(card_to_record).collect();
    serde_json::to_vec(&records).map_err(PersistenceError::Encode)
}

/// Deserializes the persisted JSON shape, dropping unusable records.
///
/// # Errors
/// - `Decode` when the blob is not a JSON array.
pub fn decode_cards(bytes: &[u8]) -> RepoResult<LoadOutcome> {
    let raw: Vec<Value> =
        serde_json::from_slice(bytes).map_err(PersistenceError::Decode)?;

    let mut outcome = LoadOutcome::default();
    for (position, value) in raw.into_iter().enumerate() {
        let record = match serde_json::from_value::<StoredCard>(value) {
            Ok(record) => record,
            Err(err) => {
                outcome.warnings.push(LoadWarning::CardDropped {
                    position,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        if let Some(card) = record_to_card(position, record, &mut outcome.warnings) {
            outcome.cards.push(card);
        }
    }

    Ok(outcome)
}

fn card_to_record(card: &Card) -> CardRecord {
    CardRecord {
        title: card.title().to_string(),
        is_done: card.is_done(),
        items: card
            .items()
            .iter()
            .map(|item| ItemRecord {
                name: item.name().to_string(),
                qty: format_quantity(item.quantity()),
                checked: item.is_completed(),
            })
            .collect(),
    }
}

fn record_to_card(
    position: usize,
    record: StoredCard,
    warnings: &mut Vec<LoadWarning>,
) -> Option<Card> {
    let items: Vec<Item> = record
        .items
        .iter()
        .enumerate()
        .filter_map(|(item_position, value)| {
            stored_item(position, item_position, value, warnings)
        })
        .collect();
    let stored_done = record.is_done.as_bool().unwrap_or(false);

    match Card::new(record.title, items) {
        Ok(card) => {
            if card.is_done() != stored_done {
                debug!(
                    "event=cards_load module=repo status=recomputed position={position} stored_done={stored_done} done={}",
                    card.is_done()
                );
            }
            Some(card)
        }
        Err(err) => {
            warnings.push(LoadWarning::CardDropped {
                position,
                reason: err.to_string(),
            });
            None
        }
    }
}

/// Salvages one raw item record.
///
/// A missing or non-string `name` drops the item. A non-bool `checked` reads
/// as `false`. An unusable `qty` keeps the item without a quantity.
fn stored_item(
    card_position: usize,
    item_position: usize,
    value: &Value,
    warnings: &mut Vec<LoadWarning>,
) -> Option<Item> {
    let Some(name) = value.get("name").and_then(Value::as_str) else {
        warnings.push(LoadWarning::ItemDropped {
            card_position,
            item_position,
            reason: "missing or non-string name".to_string(),
        });
        return None;
    };
    let checked = value.get("checked").and_then(Value::as_bool).unwrap_or(false);
    let quantity = match stored_quantity(value.get("qty")) {
        Ok(quantity) => quantity,
        Err(raw) => {
            warnings.push(LoadWarning::QuantityIgnored {
                card_position,
                item_position,
                raw,
            });
            None
        }
    };

    match Item::with_state(name, quantity, checked) {
        Ok(item) => Some(item),
        Err(err) => {
            warnings.push(LoadWarning::ItemDropped {
                card_position,
                item_position,
                reason: err.to_string(),
            });
            None
        }
    }
}

/// Reads a stored `qty`: absent or `""` means no quantity, numbers are taken
/// as-is, and text contributes its leading number (`"2 cups"` reads as 2).
///
/// `Err` carries the raw value when nothing usable was found.
fn stored_quantity(raw: Option<&Value>) -> Result<Option<f64>, String> {
    let parsed = match raw {
        None => return Ok(None),
        Some(Value::String(text)) => match LEADING_NUMBER_RE.find(text) {
            Some(found) => {
                if found.end() < text.trim_end().len() {
                    debug!(
                        "event=cards_load module=repo status=truncated qty=\"{text}\" used={}",
                        found.as_str()
                    );
                }
                parse_quantity_input(found.as_str())
            }
            None => parse_quantity_input(text),
        },
        Some(Value::Number(number)) => match number.as_f64() {
            Some(value) => parse_quantity_input(&value.to_string()),
            None => return Err(number.to_string()),
        },
        Some(other) => return Err(other.to_string()),
    };

    parsed.map_err(|_| match raw {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    })
}
fn format_quantity(quantity: Option<f64>) -> String {
    quantity.map(|value| value.to_string()).unwrap_or_default()
}
