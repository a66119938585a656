//! Context-sensitive suggestions for partially typed input.
//!
//! This module provides completion for:
//! - Command names (e.g., "th" -> "theme")
//! - Directory paths for `cd`, `ls`
//! - File paths for `cat`, `less`, `more`
//! - Closed argument sets such as theme names or game identifiers
//!
//! What a command's arguments complete to is declared by the command itself
//! through [`Command::completion`](crate::core::commands::Command::completion).
//! The engine only borrows the registry and filesystem, so the same input
//! always yields the same suggestions.

use crate::core::commands::Completion;
use crate::core::filesystem::{expand_home, join_path};
use crate::core::registry::CommandRegistry;
use crate::core::VirtualFs;
use crate::models::{NodeKind, Suggestion, SuggestionKind};

// ============================================================================
// Public Types
// ============================================================================

/// Result of a Tab completion attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum AutocompleteResult {
    /// Single match - the whole input line, completed.
    Single(String),
    /// Multiple matches - (input extended to the common prefix, all matches).
    Multiple(String, Vec<String>),
    /// No matches found.
    None,
}

// ============================================================================
// Query Parsing
// ============================================================================

/// What part of the input is being completed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Query<'i> {
    /// Still typing the command word.
    Command(&'i str),
    /// Typing an argument of `command`.
    Argument { command: &'i str, fragment: &'i str },
}

impl<'i> Query<'i> {
    fn parse(input: &'i str) -> Self {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let trailing_space = input.ends_with(char::is_whitespace);

        match tokens[..] {
            [] => Self::Command(""),
            [only] if !trailing_space => Self::Command(only),
            [command, .., last] => Self::Argument {
                command,
                fragment: if trailing_space { "" } else { last },
            },
            [command] => Self::Argument {
                command,
                fragment: "",
            },
        }
    }

    /// The token the suggestions replace.
    fn fragment(self) -> &'i str {
        match self {
            Self::Command(token) => token,
            Self::Argument { fragment, .. } => fragment,
        }
    }
}

// ============================================================================
// Path Parsing
// ============================================================================

/// A path fragment split at its last separator.
struct ParsedPath<'a> {
    /// Directory prefix kept verbatim in suggestions (e.g., "projects/" or "").
    dir_part: &'a str,
    /// Name being completed.
    name_part: &'a str,
    /// Absolute directory to search.
    search_dir: String,
}

impl<'a> ParsedPath<'a> {
    fn parse(fragment: &'a str, current_path: &str) -> Self {
        let cwd = expand_home(current_path);
        let (dir_part, name_part) = match fragment.rfind('/') {
            Some(idx) => (&fragment[..=idx], &fragment[idx + 1..]),
            None => ("", fragment),
        };
        let search_dir = if dir_part.is_empty() {
            cwd
        } else {
            join_path(&cwd, dir_part)
        };

        Self {
            dir_part,
            name_part,
            search_dir,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Suggestion engine over a registry and a filesystem.
pub struct AutocompleteEngine<'a> {
    registry: &'a CommandRegistry,
    fs: &'a VirtualFs,
}

impl<'a> AutocompleteEngine<'a> {
    pub fn new(registry: &'a CommandRegistry, fs: &'a VirtualFs) -> Self {
        Self { registry, fs }
    }

    /// Ordered suggestions for `input` typed in `current_path`.
    pub fn suggest(&self, input: &str, current_path: &str) -> Vec<Suggestion> {
        match Query::parse(input) {
            Query::Command(prefix) => self.command_suggestions(prefix),
            Query::Argument { command, fragment } => {
                let Some(command) = self.registry.get(command) else {
                    return Vec::new();
                };
                match command.completion() {
                    Completion::None => Vec::new(),
                    Completion::Directories => {
                        self.path_suggestions(fragment, current_path, NodeKind::Directory)
                    }
                    Completion::Files => {
                        self.path_suggestions(fragment, current_path, NodeKind::File)
                    }
                    Completion::Values(values) => values
                        .iter()
                        .filter(|(value, _)| value.starts_with(fragment))
                        .map(|(value, description)| {
                            Suggestion::new(*value, SuggestionKind::Argument)
                                .with_description(*description)
                        })
                        .collect(),
                }
            }
        }
    }

    /// Tab completion: the completed line, or the shared prefix and options.
    pub fn complete(&self, input: &str, current_path: &str) -> AutocompleteResult {
        let suggestions = self.suggest(input, current_path);
        let fragment = Query::parse(input).fragment();
        let head = &input[..input.len() - fragment.len()];

        match suggestions.as_slice() {
            [] => AutocompleteResult::None,
            [only] => {
                let suffix = if only.kind == SuggestionKind::Directory {
                    "/"
                } else {
                    " "
                };
                AutocompleteResult::Single(format!("{}{}{}", head, only.value, suffix))
            }
            many => {
                let values: Vec<String> = many.iter().map(|s| s.value.clone()).collect();
                let common = find_common_prefix(&values);
                AutocompleteResult::Multiple(format!("{}{}", head, common), values)
            }
        }
    }

    /// Ghost-text hint: the suffix that would complete the current input.
    ///
    /// Blank input has no hint.
    pub fn hint(&self, input: &str, current_path: &str) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        let fragment = Query::parse(input).fragment();
        self.suggest(input, current_path)
            .into_iter()
            .find(|s| s.value != fragment)
            .map(|s| s.value[fragment.len()..].to_string())
    }

    fn command_suggestions(&self, prefix: &str) -> Vec<Suggestion> {
        self.registry
            .list_available()
            .iter()
            .filter(|c| c.name().starts_with(prefix))
            .map(|c| {
                Suggestion::new(c.name(), SuggestionKind::Command).with_description(c.description())
            })
            .collect()
    }

    fn path_suggestions(&self, fragment: &str, current_path: &str, kind: NodeKind) -> Vec<Suggestion> {
        let parsed = ParsedPath::parse(fragment, current_path);
        let Some(entries) = self.fs.list(&parsed.search_dir, false) else {
            return Vec::new();
        };
        let (suggestion_kind, description) = match kind {
            NodeKind::Directory => (SuggestionKind::Directory, "directory"),
            NodeKind::File => (SuggestionKind::File, "file"),
        };

        entries
            .into_iter()
            .filter(|node| node.kind() == kind && node.name.starts_with(parsed.name_part))
            .map(|node| {
                Suggestion::new(format!("{}{}", parsed.dir_part, node.name), suggestion_kind)
                    .with_description(description)
            })
            .collect()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Find the longest common prefix of multiple strings.
pub fn find_common_prefix(strings: &[String]) -> String {
    let Some((first, rest)) = strings.split_first() else {
        return String::new();
    };

    let mut prefix_len = first.len();
    for s in rest {
        prefix_len = first
            .char_indices()
            .zip(s.chars())
            .take_while(|((i, a), b)| *i < prefix_len && a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0);
    }

    first[..prefix_len].to_string()
}

// ============================================================================
// Tests
// ============================================================================
