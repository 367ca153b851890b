//! Edit session over one card's detached working copy.
//!
//! # Responsibility
//! - Copy a card's title and items into a working buffer on open.
//! - Apply edits to the buffer only.
//! - Commit the buffer back into the card store on close.
//!
//! # Invariants
//! - At most one session is open per `EditSession` value.
//! - Working-copy edits never touch the store or trigger persistence.
//! - `close` always commits and always leaves the session closed.
//! - `close` on a closed session is a no-op.

use crate::model::card::Card;
use crate::model::item::{parse_quantity_input, Item};
use crate::model::text::Normalizer;
use crate::model::ValidationError;
use crate::repo::card_repo::CardRepository;
use crate::service::card_store::CardStore;
use crate::service::error::{NotFound, ServiceError, ServiceResult};
use log::{debug, info};
use std::fmt;
use std::mem;

const NOT_OPEN: &str = "no edit session is open";

/// Detached, mutable copy of a card's editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingCopy {
    title: String,
    items: Vec<Item>,
}

impl WorkingCopy {
    fn from_card(card: &Card) -> Self {
        Self {
            title: card.title().to_string(),
            items: card.items().to_vec(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

#[derive(Default)]
enum SessionState {
    #[default]
    Closed,
    Open {
        target: usize,
        working: WorkingCopy,
        normalizer: Normalizer,
    },
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("Closed"),
            Self::Open {
                target, working, ..
            } => f
                .debug_struct("Open")
                .field("target", target)
                .field("working", working)
                .finish_non_exhaustive(),
        }
    }
}

/// `Closed -> Open(working copy) -> Closed` state machine.
#[derive(Debug, Default)]
pub struct EditSession {
    state: SessionState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    /// Index of the card being edited.
    pub fn target(&self) -> Option<usize> {
        match &self.state {
            SessionState::Open { target, .. } => Some(*target),
            SessionState::Closed => None,
        }
    }

    pub fn working(&self) -> Option<&WorkingCopy> {
        match &self.state {
            SessionState::Open { working, .. } => Some(working),
            SessionState::Closed => None,
        }
    }

    /// Opens a session on the card at `card_index`.
    ///
    /// # Errors
    /// - `InvalidState` when a session is already open.
    /// - `NotFound` when `card_index` is out of range.
    pub fn open<R: CardRepository>(
        &mut self,
        store: &CardStore<R>,
        card_index: usize,
    ) -> ServiceResult<&WorkingCopy> {
        if self.is_open() {
            return Err(ServiceError::InvalidState("an edit session is already open"));
        }
        let card = store.card(card_index)?;
        self.state = SessionState::Open {
            target: card_index,
            working: WorkingCopy::from_card(card),
            normalizer: store.config().normalizer,
        };
        info!("event=edit_open module=session status=ok card={card_index}");

        self.working().ok_or(ServiceError::InvalidState(NOT_OPEN))
    }

    /// Renames the working copy. Normalization is applied on commit.
    pub fn rename_working(&mut self, title: &str) -> ServiceResult<()> {
        let (working, _) = self.open_parts()?;
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        working.title = trimmed.to_string();
        Ok(())
    }

    /// Appends an item built from raw editor input and returns its position.
    ///
    /// `quantity` is raw text; blank means no quantity.
    pub fn add_working_item(&mut self, name: &str, quantity: &str) -> ServiceResult<usize> {
        let (working, normalizer) = self.open_parts()?;
        let quantity = parse_quantity_input(quantity)?;
        let item = Item::new(normalizer(name.trim()), quantity)?;
        working.items.push(item);
        debug!(
            "event=edit_item_add module=session status=ok items={}",
            working.items.len()
        );
        Ok(working.items.len() - 1)
    }

    pub fn remove_working_item(&mut self, item_index: usize) -> ServiceResult<Item> {
        let (working, _) = self.open_parts()?;
        if item_index >= working.items.len() {
            return Err(ServiceError::NotFound(NotFound::WorkingItem(item_index)));
        }
        Ok(working.items.remove(item_index))
    }

    /// Flips a working item's completion flag and returns the new value.
    pub fn toggle_working_item(&mut self, item_index: usize) -> ServiceResult<bool> {
        let (working, _) = self.open_parts()?;
        working
            .items
            .get_mut(item_index)
            .map(Item::toggle)
            .ok_or(ServiceError::NotFound(NotFound::WorkingItem(item_index)))
    }

    /// Ends the session, committing the working copy into `store`.
    ///
    /// Returns the committed card, or `None` when no session was open. The
    /// session is closed afterwards even when the commit fails.
    pub fn close<R: CardRepository>(
        &mut self,
        store: &mut CardStore<R>,
    ) -> ServiceResult<Option<Card>> {
        let SessionState::Open {
            target, working, ..
        } = mem::take(&mut self.state)
        else {
            return Ok(None);
        };

        let card = store.replace_card(target, &working.title, working.items)?;
        info!("event=edit_close module=session status=ok card={target}");
        Ok(Some(card))
    }

    /// Ends the session without touching the store.
    ///
    /// Returns whether a session was open.
    pub fn discard(&mut self) -> bool {
        let was_open = self.is_open();
        if let Some(target) = self.target() {
            info!("event=edit_discard module=session status=ok card={target}");
        }
        self.state = SessionState::Closed;
        was_open
    }

    fn open_parts(&mut self) -> ServiceResult<(&mut WorkingCopy, Normalizer)> {
        match &mut self.state {
            SessionState::Open {
                working,
                normalizer,
                ..
            } => Ok((working, *normalizer)),
            SessionState::Closed => Err(ServiceError::InvalidState(NOT_OPEN)),
        }
    }
}
