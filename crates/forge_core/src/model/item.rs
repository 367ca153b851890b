//! Checklist line item.
//!
//! # Invariants
//! - `name` is trimmed and non-empty.
//! - `quantity`, when present, is finite and `>= 0`.
//! - Items carry no identity; callers address them by position in a card.

use super::ValidationError;

/// One line entry of a card.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    quantity: Option<f64>,
    completed: bool,
}

impl Item {
    /// Creates an uncompleted item.
    ///
    /// # Errors
    /// - `EmptyItemName` when `name` is blank after trim.
    /// - `NegativeQuantity`/`NonFiniteQuantity` for an out-of-range quantity.
    pub fn new(name: impl Into<String>, quantity: Option<f64>) -> Result<Self, ValidationError> {
        Self::with_state(name, quantity, false)
    }

    /// Creates an item with an explicit completion flag.
    ///
    /// Used by load and edit paths that carry an existing checked state.
    pub fn with_state(
        name: impl Into<String>,
        quantity: Option<f64>,
        completed: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyItemName);
        }
        if let Some(value) = quantity {
            validate_quantity(value)?;
        }

        Ok(Self {
            name: trimmed.to_string(),
            quantity,
            completed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tracked quantity, `None` when the item has no quantity.
    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// Parses raw quantity input from an editor field.
///
/// Blank input means "no quantity tracked".
///
/// # Errors
/// - `InvalidQuantity` when the text is not a number.
/// - `NegativeQuantity`/`NonFiniteQuantity` for out-of-range numbers.
pub fn parse_quantity_input(raw: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidQuantity(trimmed.to_string()))?;
    validate_quantity(value)?;
    Ok(Some(value))
}

fn validate_quantity(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteQuantity);
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeQuantity(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_quantity_input, Item};
    use crate::model::ValidationError;

    #[test]
    fn new_item_starts_uncompleted_and_trims_name() {
        let item = Item::new("  Salt ", Some(2.0)).unwrap();
        assert_eq!(item.name(), "Salt");
        assert_eq!(item.quantity(), Some(2.0));
        assert!(!item.is_completed());
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(Item::new("   ", None), Err(ValidationError::EmptyItemName));
    }

    #[test]
    fn rejects_negative_and_non_finite_quantity() {
        assert_eq!(
            Item::new("Salt", Some(-1.0)),
            Err(ValidationError::NegativeQuantity(-1.0))
        );
        assert_eq!(
            Item::new("Salt", Some(f64::NAN)),
            Err(ValidationError::NonFiniteQuantity)
        );
    }

    #[test]
    fn zero_quantity_is_allowed() {
        assert_eq!(Item::new("Salt", Some(0.0)).unwrap().quantity(), Some(0.0));
    }

    #[test]
    fn toggle_flips_completion() {
        let mut item = Item::new("Salt", None).unwrap();
        assert!(item.toggle());
        assert!(!item.toggle());
    }

    #[test]
    fn parse_quantity_input_handles_blank_numeric_and_garbage() {
        assert_eq!(parse_quantity_input(""), Ok(None));
        assert_eq!(parse_quantity_input("  "), Ok(None));
        assert_eq!(parse_quantity_input(" 2.5 "), Ok(Some(2.5)));
        assert_eq!(
            parse_quantity_input("two"),
            Err(ValidationError::InvalidQuantity("two".to_string()))
        );
        assert_eq!(
            parse_quantity_input("-3"),
            Err(ValidationError::NegativeQuantity(-3.0))
        );
        assert_eq!(parse_quantity_input("inf"), Err(ValidationError::NonFiniteQuantity));
    }
}
