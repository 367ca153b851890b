//! Named checklist card.
//!
//! # Invariants
//! - `title` is trimmed and non-empty.
//! - `done == !items.is_empty() && items.all(completed)` after every mutation.
//! - Item order is preserved; duplicate names are allowed.

use super::item::Item;
use super::ValidationError;

/// A named, ordered checklist with a derived completion flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    title: String,
    items: Vec<Item>,
    done: bool,
}

impl Card {
    /// Creates a card from a title and an ordered item list.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank after trim.
    pub fn new(title: impl Into<String>, items: Vec<Item>) -> Result<Self, ValidationError> {
        let title = validate_title(title.into())?;
        let mut card = Self {
            title,
            items,
            done: false,
        };
        card.refresh_done();
        Ok(card)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether every item is completed. Empty cards are never done.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Replaces the title.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank after trim.
    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.title = validate_title(title.into())?;
        Ok(())
    }

    /// Flips one item's completion flag.
    ///
    /// Returns the new flag, or `None` when `index` is out of range.
    pub fn toggle_item(&mut self, index: usize) -> Option<bool> {
        let completed = self.items.get_mut(index)?.toggle();
        self.refresh_done();
        Some(completed)
    }

    /// Replaces the whole item list.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.refresh_done();
    }

    /// Clears completion on every item.
    pub fn reset_completion(&mut self) {
        for item in &mut self.items {
            item.set_completed(false);
        }
        self.refresh_done();
    }

    fn refresh_done(&mut self) {
        self.done = !self.items.is_empty() && self.items.iter().all(Item::is_completed);
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
