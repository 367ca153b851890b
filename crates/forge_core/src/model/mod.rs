//! Checklist domain model.
//!
//! # Responsibility
//! - Define the `Card`/`Item` records shared by store, session and renderer.
//! - Reject invalid input at construction time.
//!
//! # Invariants
//! - Card titles and item names are never blank.
//! - Item quantities, when present, are finite and `>= 0`.
//! - `Card::is_done()` always reflects the current item list.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod card;
pub mod item;
pub mod text;

/// Input rejected by `Card`/`Item` constructors and mutators.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Card title is missing or blank after trim.
    EmptyTitle,
    /// Item name is missing or blank after trim.
    EmptyItemName,
    /// Quantity is below zero.
    NegativeQuantity(f64),
    /// Quantity is NaN or infinite.
    NonFiniteQuantity,
    /// Quantity input text is not a number.
    InvalidQuantity(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "card title must not be blank"),
            Self::EmptyItemName => write!(f, "item name must not be blank"),
            Self::NegativeQuantity(value) => {
                write!(f, "quantity must be >= 0, got {value}")
            }
            Self::NonFiniteQuantity => write!(f, "quantity must be a finite number"),
            Self::InvalidQuantity(raw) => write!(f, "quantity is not a number: `{raw}`"),
        }
    }
}

impl Error for ValidationError {}
