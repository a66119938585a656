//! A portfolio terminal: an in-memory filesystem, a command registry with
//! dispatch, and a context-sensitive autocomplete engine.
//!
//! The entry point is [`core::Shell`]. The UI that renders its transcript is
//! not part of this crate.

pub mod config;
pub mod core;
pub mod models;
pub mod utils;
