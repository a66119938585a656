//! The command contract and the built-in commands.
//!
//! This module provides:
//! - [`Command`] trait implemented by every command
//! - [`CommandOutput`] for command results
//! - [`ShellContext`] handed to a command while it runs
//! - [`builtin_commands`] for the stock command set
//!
//! # Architecture
//!
//! Commands are independent values registered into a
//! [`CommandRegistry`](crate::core::registry::CommandRegistry). The shell looks
//! a command up by name or alias, builds a context over the filesystem and the
//! session, and awaits [`Command::execute`].

mod basic;
mod fs;
mod games;
mod portfolio;
mod result;
mod unix;

pub use basic::{Clear, Help, Lang, Sound, ThemeCmd};
pub use fs::{Cat, Cd, Ls, Pwd};
pub use games::{Exit, Play, Scores};
pub use portfolio::{About, Contact, Education, Experience, Projects, Resume, Skills};
pub use result::CommandOutput;
pub use unix::{Date, Echo, History, Whoami};

use std::rc::Rc;

use async_trait::async_trait;

use crate::core::VirtualFs;
use crate::core::error::CommandError;
use crate::core::filesystem::{expand_home, join_path};
use crate::core::registry::CommandRegistry;
use crate::core::storage::KeyValueStore;
use crate::models::Session;

// =============================================================================
// Completion Strategy
// =============================================================================

/// How the autocomplete engine completes a command's arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// No known argument grammar.
    None,
    /// Directories in the working directory.
    Directories,
    /// Files in the working directory.
    Files,
    /// A closed set of `(value, description)` pairs.
    Values(&'static [(&'static str, &'static str)]),
}

// =============================================================================
// Command Trait
// =============================================================================

/// A single executable command.
#[async_trait(?Send)]
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Additional keys bound to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description shown in suggestions.
    fn description(&self) -> &str;

    /// Hidden commands are dispatchable but not listed.
    fn hidden(&self) -> bool {
        false
    }

    /// How the autocomplete engine completes this command's arguments.
    fn completion(&self) -> Completion {
        Completion::None
    }

    /// Run the command with positional arguments.
    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError>;
}

// =============================================================================
// Execution Context
// =============================================================================

/// Everything a command may read or change while it runs.
pub struct ShellContext<'a> {
    pub fs: &'a VirtualFs,
    pub registry: &'a CommandRegistry,
    pub store: &'a dyn KeyValueStore,
    pub session: &'a mut Session,
    /// Set by `clear`; the shell empties the transcript after success.
    pub clear_screen: bool,
}

impl<'a> ShellContext<'a> {
    pub fn new(
        fs: &'a VirtualFs,
        registry: &'a CommandRegistry,
        store: &'a dyn KeyValueStore,
        session: &'a mut Session,
    ) -> Self {
        Self {
            fs,
            registry,
            store,
            session,
            clear_screen: false,
        }
    }

    /// Absolute form of the working directory.
    pub fn cwd(&self) -> String {
        expand_home(&self.session.current_path)
    }

    /// Resolve a user-typed path against the working directory.
    pub fn absolute(&self, path: &str) -> String {
        join_path(&self.cwd(), path)
    }
}

/// The stock command set, in registration order.
pub fn builtin_commands() -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(Help),
        Rc::new(Clear),
        Rc::new(ThemeCmd),
        Rc::new(Sound),
        Rc::new(Lang),
        Rc::new(About),
        Rc::new(Skills),
        Rc::new(Projects),
        Rc::new(Contact),
        Rc::new(Resume),
        Rc::new(Experience),
        Rc::new(Education),
        Rc::new(Ls),
        Rc::new(Cd),
        Rc::new(Cat),
        Rc::new(Pwd),
        Rc::new(Whoami),
        Rc::new(Date),
        Rc::new(Echo),
        Rc::new(History),
        Rc::new(Play),
        Rc::new(Exit),
        Rc::new(Scores),
    ]
}

// =============================================================================
// Test Support
// =============================================================================
