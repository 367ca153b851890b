//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and repository persistence.
//! - Keep renderer/host code decoupled from storage details.

pub mod board;
pub mod card_store;
pub mod edit_session;
pub mod error;
