//! Intent dispatcher at the renderer boundary.
//!
//! # Responsibility
//! - Route renderer intents to the card store or the edit session.
//! - Stage deletions until the confirmation dialog answers.
//! - Tell the renderer what to redraw after each intent.
//!
//! # Invariants
//! - `RequestDelete` never mutates the collection.
//! - Only `ConfirmDelete` deletes, and only the staged index.
//! - Deletions are refused while an edit session is open, so the session's
//!   target index cannot shift underneath it.

use crate::repo::card_repo::{CardRepository, LoadWarning};
use crate::service::card_store::{CardStore, CardView};
use crate::service::edit_session::{EditSession, WorkingCopy};
use crate::service::error::{ServiceError, ServiceResult};
use log::debug;

/// User intent emitted by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create { title: String },
    Duplicate { index: usize },
    /// Stage a card for deletion and ask the user to confirm.
    RequestDelete { index: usize },
    ConfirmDelete,
    CancelDelete,
    ToggleItem { card_index: usize, item_index: usize },
    OpenEdit { index: usize },
    RenameWorking { title: String },
    /// `quantity` is raw input text; blank means no quantity.
    AddWorkingItem { name: String, quantity: String },
    RemoveWorkingItem { index: usize },
    ToggleWorkingItem { index: usize },
    /// Close the editor, committing the working copy.
    CloseEdit,
    /// Close the editor, dropping the working copy.
    DiscardEdit,
}

/// What the renderer should do after an intent was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RedrawBoard,
    RedrawEditor,
    /// Show the confirmation dialog for the staged card.
    ConfirmDeletion(usize),
    Nothing,
}

/// One card store plus the transient UI state around it.
pub struct Board<R: CardRepository> {
    store: CardStore<R>,
    session: EditSession,
    pending_delete: Option<usize>,
}

impl<R: CardRepository> Board<R> {
    pub fn new(store: CardStore<R>) -> Self {
        Self {
            store,
            session: EditSession::new(),
            pending_delete: None,
        }
    }

    pub fn store(&self) -> &CardStore<R> {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Working copy of the open editor, if any.
    pub fn editor(&self) -> Option<&WorkingCopy> {
        self.session.working()
    }

    pub fn pending_delete(&self) -> Option<usize> {
        self.pending_delete
    }

    pub fn views(&self) -> Vec<CardView<'_>> {
        self.store.views()
    }

    /// Reloads persisted state. Any staged deletion is forgotten.
    pub fn reload(&mut self) -> ServiceResult<Vec<LoadWarning>> {
        if self.session.is_open() {
            return Err(ServiceError::InvalidState(
                "cannot reload while an edit session is open",
            ));
        }
        self.pending_delete = None;
        self.store.load()
    }

    /// Applies one intent.
    pub fn dispatch(&mut self, intent: Intent) -> ServiceResult<Effect> {
        debug!("event=intent module=board intent={intent:?}");
        match intent {
            Intent::Create { title } => {
                self.store.add_card(&title)?;
                Ok(Effect::RedrawBoard)
            }
            Intent::Duplicate { index } => {
                self.store.duplicate_card(index)?;
                Ok(Effect::RedrawBoard)
            }
            Intent::RequestDelete { index } => {
                self.ensure_not_editing()?;
                self.store.card(index)?;
                self.pending_delete = Some(index);
                Ok(Effect::ConfirmDeletion(index))
            }
            Intent::ConfirmDelete => {
                self.ensure_not_editing()?;
                match self.pending_delete.take() {
                    Some(index) => {
                        self.store.delete_card(index)?;
                        Ok(Effect::RedrawBoard)
                    }
                    None => Ok(Effect::Nothing),
                }
            }
            Intent::CancelDelete => {
                self.pending_delete = None;
                Ok(Effect::Nothing)
            }
            Intent::ToggleItem {
                card_index,
                item_index,
            } => {
                self.store.toggle_item(card_index, item_index)?;
                Ok(Effect::RedrawBoard)
            }
            Intent::OpenEdit { index } => {
                self.session.open(&self.store, index)?;
                Ok(Effect::RedrawEditor)
            }
            Intent::RenameWorking { title } => {
                self.session.rename_working(&title)?;
                Ok(Effect::RedrawEditor)
            }
            Intent::AddWorkingItem { name, quantity } => {
                self.session.add_working_item(&name, &quantity)?;
                Ok(Effect::RedrawEditor)
            }
            Intent::RemoveWorkingItem { index } => {
                self.session.remove_working_item(index)?;
                Ok(Effect::RedrawEditor)
            }
            Intent::ToggleWorkingItem { index } => {
                self.session.toggle_working_item(index)?;
                Ok(Effect::RedrawEditor)
            }
            Intent::CloseEdit => match self.session.close(&mut self.store)? {
                Some(_) => Ok(Effect::RedrawBoard),
                None => Ok(Effect::Nothing),
            },
            Intent::DiscardEdit => {
                if self.session.discard() {
                    Ok(Effect::RedrawBoard)
                } else {
                    Ok(Effect::Nothing)
                }
            }
        }
    }

    fn ensure_not_editing(&self) -> ServiceResult<()> {
        if self.session.is_open() {
            return Err(ServiceError::InvalidState(
                "cannot delete cards while an edit session is open",
            ));
        }
        Ok(())
    }
}
