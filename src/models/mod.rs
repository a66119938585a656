//! Data models and types for the terminal.
//!
//! Contains domain types for:
//! - [`Node`], [`NodeBody`], [`NodeKind`] - Virtual filesystem representation
//! - [`OutputLine`], [`Suggestion`] - Terminal output and completion types
//! - [`Session`], [`Settings`] - Per-terminal mutable state

mod filesystem;
mod session;
mod terminal;

pub use filesystem::{Node, NodeBody, NodeKind};
pub use session::{Game, Language, Session, Settings, Theme, UnknownVariant};
pub use terminal::{OutputLine, OutputLineData, Suggestion, SuggestionKind};
