//! Error taxonomy shared by store, edit session and board.

use crate::model::ValidationError;
use crate::repo::card_repo::PersistenceError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Which position lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    Card(usize),
    Item { card: usize, item: usize },
    /// Item position inside the open edit session's working copy.
    WorkingItem(usize),
}

impl Display for NotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card(index) => write!(f, "card #{index}"),
            Self::Item { card, item } => write!(f, "item #{item} of card #{card}"),
            Self::WorkingItem(index) => write!(f, "working item #{index}"),
        }
    }
}

/// Error returned by every service-level operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Required field missing or out of range.
    Validation(ValidationError),
    /// Index out of range.
    NotFound(NotFound),
    /// Operation not allowed in the current session state.
    InvalidState(&'static str),
    /// Store read/write failed. In-memory state is not rolled back.
    Persistence(PersistenceError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "not found: {target}"),
            Self::InvalidState(details) => write!(f, "invalid state: {details}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::NotFound(_) | Self::InvalidState(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for ServiceError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}
