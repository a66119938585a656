//! The interactive shell: dispatch, suggestions, history and transcript.
//!
//! [`Shell`] owns everything one terminal instance needs. Input lines are
//! serialized through an async mutex so at most one command runs at a time;
//! a second line submitted while one is in flight waits for it.
//!
//! Every command runs guarded:
//! - a handler error is rendered as one output line
//! - a panic is caught and rendered the same way
//! - a handler exceeding the configured timeout is abandoned
//!
//! In all three cases the session is restored to the snapshot taken before
//! the command started.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{Either, select};
use futures::lock::Mutex;
use log::{debug, warn};

use crate::config::{MAX_TRANSCRIPT_LINES, ShellConfig};
use crate::core::autocomplete::{AutocompleteEngine, AutocompleteResult};
use crate::core::commands::{Command, CommandOutput, ShellContext, builtin_commands};
use crate::core::error::{CommandError, RegistryError};
use crate::core::registry::{CommandRegistry, tokenize};
use crate::core::storage::{CommandHistory, KeyValueStore, load_settings};
use crate::core::VirtualFs;
use crate::models::{OutputLine, Session, Settings, Suggestion};
use crate::utils::{RingBuffer, timer};

// =============================================================================
// Types
// =============================================================================

/// What one submitted line produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    /// The prompt echo followed by the command's output lines.
    pub output: Vec<OutputLine>,
    /// The command asked for the transcript to be cleared.
    pub cleared: bool,
}

/// Result of running one line, before transcript bookkeeping.
struct Outcome {
    lines: Vec<String>,
    failed: bool,
    cleared: bool,
}

impl Outcome {
    fn empty() -> Self {
        Self {
            lines: Vec::new(),
            failed: false,
            cleared: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            lines: vec![message.into()],
            failed: true,
            cleared: false,
        }
    }
}

/// State guarded by the dispatch lock.
struct ShellState {
    session: Session,
    history: CommandHistory,
    transcript: RingBuffer<OutputLine>,
}

// =============================================================================
// Shell
// =============================================================================

pub struct Shell {
    registry: CommandRegistry,
    fs: Arc<VirtualFs>,
    store: Rc<dyn KeyValueStore>,
    timeout: Option<Duration>,
    state: Mutex<ShellState>,
}

impl Shell {
    /// Build a shell with the built-in command set.
    pub fn new(
        config: &ShellConfig,
        fs: Arc<VirtualFs>,
        store: Rc<dyn KeyValueStore>,
    ) -> Result<Self, RegistryError> {
        let mut registry = CommandRegistry::new(config.registration_policy());
        registry.register_all(builtin_commands())?;
        Ok(Self::with_registry(config, registry, fs, store))
    }

    /// Build a shell around a prepared registry.
    ///
    /// Settings and history are restored from `store`; `config` supplies the
    /// fallbacks.
    pub fn with_registry(
        config: &ShellConfig,
        registry: CommandRegistry,
        fs: Arc<VirtualFs>,
        store: Rc<dyn KeyValueStore>,
    ) -> Self {
        let defaults = Settings {
            username: config.username.clone(),
            hostname: config.hostname.clone(),
            ..Settings::default()
        };
        let session = Session::new(load_settings(store.as_ref(), defaults));
        let history = CommandHistory::load(store.as_ref(), config.history_limit);

        Self {
            registry,
            fs,
            store,
            timeout: config.timeout(),
            state: Mutex::new(ShellState {
                session,
                history,
                transcript: RingBuffer::new(MAX_TRANSCRIPT_LINES),
            }),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn fs(&self) -> &Arc<VirtualFs> {
        &self.fs
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Run one input line and return its output lines.
    ///
    /// Never fails: unknown commands and command failures come back as a
    /// single line of output.
    pub async fn dispatch(&self, line: &str) -> Vec<String> {
        let mut state = self.state.lock().await;
        self.run_line(&mut state, line).await.lines
    }

    /// Run one line as typed at the terminal.
    ///
    /// Records non-blank input in the persisted history, unless the command
    /// fails, and appends the prompt echo plus output to the transcript.
    pub async fn submit(&self, line: &str) -> Submission {
        let mut state = self.state.lock().await;
        let prompt = state.session.prompt();

        // recorded before running so `history` lists itself
        let recorded = !line.trim().is_empty();
        let history_before = state.history.clone();
        if recorded {
            state.history.push(line);
            self.persist_history(&state.history);
        }

        let outcome = self.run_line(&mut state, line).await;
        if recorded && outcome.failed {
            state.history = history_before;
            self.persist_history(&state.history);
        }

        let mut output = vec![OutputLine::command(prompt, line.trim())];
        output.extend(outcome.lines.into_iter().map(|l| {
            if outcome.failed {
                OutputLine::error(l)
            } else {
                OutputLine::text(l)
            }
        }));

        if outcome.cleared {
            state.transcript.clear();
        } else {
            state.transcript.extend(output.iter().cloned());
        }

        Submission {
            output,
            cleared: outcome.cleared,
        }
    }

    fn persist_history(&self, history: &CommandHistory) {
        if let Err(e) = history.save(self.store.as_ref()) {
            warn!("failed to persist command history: {}", e);
        }
    }

    async fn run_line(&self, state: &mut ShellState, line: &str) -> Outcome {
        let Some((key, args)) = tokenize(line) else {
            return Outcome::empty();
        };
        let Some(command) = self.registry.get(&key) else {
            debug!("unknown command '{}'", key);
            return Outcome::error(format!("Command not found: {}", key));
        };

        debug!("dispatching '{}' with {} argument(s)", command.name(), args.len());
        match self.run_guarded(command.as_ref(), &args, &mut state.session).await {
            Ok((output, cleared)) => Outcome {
                lines: output.into_lines(),
                failed: false,
                cleared,
            },
            Err(e) => {
                warn!("command '{}' failed: {}", command.name(), e);
                Outcome::error(e.to_string())
            }
        }
    }

    /// Execute `command`, restoring `session` unless it succeeds.
    async fn run_guarded(
        &self,
        command: &dyn Command,
        args: &[String],
        session: &mut Session,
    ) -> Result<(CommandOutput, bool), CommandError> {
        let snapshot = session.clone();
        let mut ctx = ShellContext::new(&self.fs, &self.registry, self.store.as_ref(), session);

        let finished = {
            let run = AssertUnwindSafe(command.execute(args, &mut ctx)).catch_unwind();
            match self.timeout {
                None => run.await,
                Some(limit) => match select(run, Box::pin(timer::sleep(limit))).await {
                    Either::Left((finished, _)) => finished,
                    Either::Right(((), _)) => Ok(Err(CommandError::TimedOut {
                        command: command.name().to_string(),
                        limit,
                    })),
                },
            }
        };
        let cleared = ctx.clear_screen;

        let result = match finished {
            Ok(result) => result,
            Err(payload) => Err(CommandError::Panicked {
                command: command.name().to_string(),
                message: panic_message(payload.as_ref()),
            }),
        };
        match result {
            Ok(output) => Ok((output, cleared)),
            Err(e) => {
                *session = snapshot;
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Suggestions
    // -------------------------------------------------------------------------

    pub fn suggest(&self, input: &str, current_path: &str) -> Vec<Suggestion> {
        self.engine().suggest(input, current_path)
    }

    pub fn complete(&self, input: &str, current_path: &str) -> AutocompleteResult {
        self.engine().complete(input, current_path)
    }

    pub fn hint(&self, input: &str, current_path: &str) -> Option<String> {
        self.engine().hint(input, current_path)
    }

    fn engine(&self) -> AutocompleteEngine<'_> {
        AutocompleteEngine::new(&self.registry, &self.fs)
    }

    // -------------------------------------------------------------------------
    // State Accessors
    // -------------------------------------------------------------------------

    pub async fn session(&self) -> Session {
        self.state.lock().await.session.clone()
    }

    pub async fn current_path(&self) -> String {
        self.state.lock().await.session.current_path.clone()
    }

    pub async fn prompt(&self) -> String {
        self.state.lock().await.session.prompt()
    }

    pub async fn transcript(&self) -> Vec<OutputLine> {
        self.state.lock().await.transcript.to_vec()
    }

    /// In-memory history, most recent first.
    pub async fn history(&self) -> Vec<String> {
        self.state.lock().await.history.recent()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
