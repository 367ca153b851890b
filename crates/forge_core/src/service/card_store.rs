//! Card collection use-case service.
//!
//! # Responsibility
//! - Own the ordered card collection and apply CRUD operations to it.
//! - Persist the whole collection after every successful mutation.
//! - Project cards into renderer views with progress and shares.
//!
//! # Invariants
//! - This store is the only writer of persisted state.
//! - Every mutation is followed by exactly one save; no batching.
//! - A failed save is reported but the in-memory mutation stays applied.
//! - Deletion removes in place; survivors keep their relative order.

use crate::config::StoreConfig;
use crate::model::card::Card;
use crate::model::item::Item;
use crate::progress::{card_progress, item_shares, CardProgress, ItemShare};
use crate::repo::card_repo::{CardRepository, LoadWarning};
use crate::service::error::{NotFound, ServiceError, ServiceResult};
use log::{error, info};

/// Renderer-facing projection of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub index: usize,
    pub card: &'a Card,
    pub progress: CardProgress,
    pub shares: Vec<ItemShare<'a>>,
}

/// Authoritative owner of the card collection.
pub struct CardStore<R: CardRepository> {
    repo: R,
    config: StoreConfig,
    cards: Vec<Card>,
}

impl<R: CardRepository> CardStore<R> {
    /// Creates an empty store. Call `load` to read persisted state.
    pub fn new(repo: R, config: StoreConfig) -> Self {
        Self {
            repo,
            config,
            cards: Vec::new(),
        }
    }

    /// Creates a store and loads persisted state in one step.
    pub fn open(repo: R, config: StoreConfig) -> ServiceResult<(Self, Vec<LoadWarning>)> {
        let mut store = Self::new(repo, config);
        let warnings = store.load()?;
        Ok((store, warnings))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replaces the in-memory collection with persisted state.
    ///
    /// Absent state yields an empty collection. Unusable records are dropped
    /// and returned as warnings. On error the current collection is kept.
    pub fn load(&mut self) -> ServiceResult<Vec<LoadWarning>> {
        let outcome = self.repo.load_cards()?;
        self.cards = outcome.cards;
        info!(
            "event=store_load module=store status=ok cards={} warnings={}",
            self.cards.len(),
            outcome.warnings.len()
        );
        Ok(outcome.warnings)
    }

    /// Writes the full collection through the repository.
    pub fn save(&mut self) -> ServiceResult<()> {
        self.repo.save_cards(&self.cards).map_err(|err| {
            error!(
                "event=store_save module=store status=error cards={} error={err}",
                self.cards.len()
            );
            ServiceError::from(err)
        })
    }

    /// Read-only view of the collection in display order.
    pub fn snapshot(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> ServiceResult<&Card> {
        self.cards
            .get(index)
            .ok_or(ServiceError::NotFound(NotFound::Card(index)))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Appends a new empty card.
    ///
    /// The title is normalized with the configured normalizer first.
    pub fn add_card(&mut self, title: &str) -> ServiceResult<Card> {
        let card = Card::new(self.config.normalize(title), Vec::new())?;
        self.cards.push(card.clone());
        info!(
            "event=card_add module=store status=ok index={}",
            self.cards.len() - 1
        );
        self.save()?;
        Ok(card)
    }

    /// Appends a copy of the card at `index` with every item unchecked.
    pub fn duplicate_card(&mut self, index: usize) -> ServiceResult<Card> {
        let source = self.card(index)?;
        let title = format!("{}{}", source.title(), self.config.copy_suffix);
        let mut copy = Card::new(title, source.items().to_vec())?;
        copy.reset_completion();

        self.cards.push(copy.clone());
        info!(
            "event=card_duplicate module=store status=ok source={index} index={}",
            self.cards.len() - 1
        );
        self.save()?;
        Ok(copy)
    }

    /// Removes the card at `index` and returns it.
    ///
    /// This is the confirmed commit step; confirmation is the caller's job.
    pub fn delete_card(&mut self, index: usize) -> ServiceResult<Card> {
        if index >= self.cards.len() {
            return Err(ServiceError::NotFound(NotFound::Card(index)));
        }
        let removed = self.cards.remove(index);
        info!("event=card_delete module=store status=ok index={index}");
        self.save()?;
        Ok(removed)
    }

    /// Flips one item's completion flag and returns the new value.
    pub fn toggle_item(&mut self, card_index: usize, item_index: usize) -> ServiceResult<bool> {
        let card = self
            .cards
            .get_mut(card_index)
            .ok_or(ServiceError::NotFound(NotFound::Card(card_index)))?;
        let completed = card.toggle_item(item_index).ok_or(ServiceError::NotFound(
            NotFound::Item {
                card: card_index,
                item: item_index,
            },
        ))?;
        info!(
            "event=item_toggle module=store status=ok card={card_index} item={item_index} completed={completed} done={}",
            card.is_done()
        );
        self.save()?;
        Ok(completed)
    }

    /// Replaces the card at `index` with one built from `title` and `items`.
    ///
    /// Commit target of an edit session. The title is normalized first.
    pub fn replace_card(
        &mut self,
        index: usize,
        title: &str,
        items: Vec<Item>,
    ) -> ServiceResult<Card> {
        if index >= self.cards.len() {
            return Err(ServiceError::NotFound(NotFound::Card(index)));
        }
        let card = Card::new(self.config.normalize(title), items)?;
        self.cards[index] = card.clone();
        info!(
            "event=card_replace module=store status=ok index={index} items={} done={}",
            card.items().len(),
            card.is_done()
        );
        self.save()?;
        Ok(card)
    }

    /// Empties the collection and removes persisted state.
    pub fn clear(&mut self) -> ServiceResult<()> {
        self.cards.clear();
        info!("event=store_clear module=store status=ok");
        self.repo.clear()?;
        Ok(())
    }

    /// Projects every card into a renderer view.
    pub fn views(&self) -> Vec<CardView<'_>> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| CardView {
                index,
                card,
                progress: card_progress(card),
                shares: item_shares(card.items()),
            })
            .collect()
    }
}
