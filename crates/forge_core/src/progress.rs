//! Derived progress and quantity-share views.
//!
//! Pure functions over model snapshots; nothing here mutates or persists.

use crate::model::card::Card;
use crate::model::item::Item;
use std::fmt::{Display, Formatter};

/// Completion summary of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardProgress {
    pub completed_count: usize,
    pub total_count: usize,
    /// `completed_count / total_count`, or `0.0` for an empty card.
    pub ratio: f64,
}

impl CardProgress {
    /// Ratio scaled to `0..=100`.
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Renders as `completed/total`.
impl Display for CardProgress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed_count, self.total_count)
    }
}

/// One item paired with its share of the card's total quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemShare<'a> {
    pub item: &'a Item,
    /// Percent rounded to one decimal. `None` when the item has no quantity
    /// or the card's total quantity is zero.
    pub share_percent: Option<f64>,
}

pub fn card_progress(card: &Card) -> CardProgress {
    let total_count = card.items().len();
    let completed_count = card.items().iter().filter(|item| item.is_completed()).count();
    let ratio = if total_count > 0 {
        completed_count as f64 / total_count as f64
    } else {
        0.0
    };

    CardProgress {
        completed_count,
        total_count,
        ratio,
    }
}

/// Computes each item's share of the summed quantity, preserving order.
///
/// Missing quantities count as zero toward the total but get no share of
/// their own. An explicit quantity of `0` in a card whose total is positive
/// gets `Some(0.0)`.
pub fn item_shares(items: &[Item]) -> Vec<ItemShare<'_>> {
    let total: f64 = items.iter().map(|item| item.quantity().unwrap_or(0.0)).sum();

    items
        .iter()
        .map(|item| {
            let share_percent = item
                .quantity()
                .filter(|_| total > 0.0)
                .map(|quantity| round_one_decimal(quantity / total * 100.0));
            ItemShare {
                item,
                share_percent,
            }
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::{card_progress, item_shares};
    use crate::model::card::Card;
    use crate::model::item::Item;

    fn item(name: &str, quantity: Option<f64>, completed: bool) -> Item {
        Item::with_state(name, quantity, completed).unwrap()
    }

    #[test]
    fn empty_card_has_zero_ratio() {
        let progress = card_progress(&Card::new("Soup", Vec::new()).unwrap());
        assert_eq!(progress.completed_count, 0);
        assert_eq!(progress.total_count, 0);
        assert_eq!(progress.ratio, 0.0);
        assert_eq!(progress.to_string(), "0/0");
    }

    #[test]
    fn ratio_counts_completed_items() {
        let card = Card::new(
            "Soup",
            vec![
                item("Salt", None, true),
                item("Water", None, false),
                item("Leek", None, true),
                item("Pepper", None, false),
            ],
        )
        .unwrap();
        let progress = card_progress(&card);
        assert_eq!(progress.completed_count, 2);
        assert_eq!(progress.total_count, 4);
        assert_eq!(progress.ratio, 0.5);
        assert_eq!(progress.percent(), 50.0);
        assert_eq!(progress.to_string(), "2/4");
    }

    #[test]
    fn shares_are_omitted_when_no_quantities() {
        let items = vec![item("Salt", None, false), item("Water", None, false)];
        assert!(item_shares(&items)
            .iter()
            .all(|share| share.share_percent.is_none()));
    }

    #[test]
    fn zero_quantity_gets_zero_share_but_missing_quantity_is_omitted() {
        let items = vec![
            item("Salt", Some(0.0), false),
            item("Water", Some(4.0), false),
            item("Leek", None, false),
        ];
        let shares = item_shares(&items);
        assert_eq!(shares[0].share_percent, Some(0.0));
        assert_eq!(shares[1].share_percent, Some(100.0));
        assert_eq!(shares[2].share_percent, None);
    }

    #[test]
    fn all_zero_quantities_have_no_shares() {
        let items = vec![item("Salt", Some(0.0), false), item("Water", Some(0.0), false)];
        assert!(item_shares(&items)
            .iter()
            .all(|share| share.share_percent.is_none()));
    }

    #[test]
    fn shares_round_to_one_decimal_and_sum_near_hundred() {
        let items = vec![
            item("A", Some(1.0), false),
            item("B", Some(1.0), false),
            item("C", Some(1.0), false),
        ];
        let shares = item_shares(&items);
        assert_eq!(shares[0].share_percent, Some(33.3));
        let sum: f64 = shares.iter().filter_map(|share| share.share_percent).sum();
        assert!((sum - 100.0).abs() <= 0.1 * items.len() as f64);
    }

    #[test]
    fn shares_preserve_input_order() {
        let items = vec![item("B", Some(3.0), false), item("A", Some(1.0), false)];
        let shares = item_shares(&items);
        assert_eq!(shares[0].item.name(), "B");
        assert_eq!(shares[0].share_percent, Some(75.0));
        assert_eq!(shares[1].item.name(), "A");
        assert_eq!(shares[1].share_percent, Some(25.0));
    }
}
