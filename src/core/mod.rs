//! Core business logic for the terminal.
//!
//! This module provides:
//! - [`VirtualFs`] virtual filesystem and path resolution
//! - [`CommandRegistry`] name/alias lookup and [`tokenize`]
//! - [`AutocompleteEngine`] for suggestions and tab completion
//! - [`Shell`] tying them together behind `dispatch`, `submit` and `suggest`

mod autocomplete;
pub mod commands;
pub mod error;
pub mod filesystem;
pub mod registry;
mod shell;
pub mod storage;

pub use autocomplete::{AutocompleteEngine, AutocompleteResult, find_common_prefix};
pub use commands::{Command, CommandOutput, Completion, ShellContext};
pub use filesystem::VirtualFs;
pub use registry::{CommandRegistry, RegistrationPolicy, tokenize};
pub use shell::{Shell, Submission};
