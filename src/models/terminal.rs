//! Terminal-related data types: transcript lines and suggestions.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A single line of the terminal transcript with a unique ID.
#[derive(Clone, Debug)]
pub struct OutputLine {
    /// Unique ID so a renderer can key lines stably.
    pub id: usize,
    pub data: OutputLineData,
}

/// The content of a transcript line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputLineData {
    /// Echo of the submitted input with the prompt it was typed at.
    Command { prompt: String, input: String },
    /// Plain command output.
    Text(String),
    /// Output of a failed or unknown command.
    Error(String),
}

static OUTPUT_LINE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl OutputLine {
    fn new(data: OutputLineData) -> Self {
        Self {
            id: OUTPUT_LINE_COUNTER.fetch_add(1, Ordering::Relaxed),
            data,
        }
    }

    pub fn command(prompt: impl Into<String>, input: impl Into<String>) -> Self {
        Self::new(OutputLineData::Command {
            prompt: prompt.into(),
            input: input.into(),
        })
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(OutputLineData::Text(s.into()))
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::new(OutputLineData::Error(s.into()))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.data, OutputLineData::Error(_))
    }
}

impl PartialEq for OutputLine {
    fn eq(&self, other: &Self) -> bool {
        // IDs are identity, not content
        self.data == other.data
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            OutputLineData::Command { prompt, input } => write!(f, "{}$ {}", prompt, input),
            OutputLineData::Text(s) | OutputLineData::Error(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// Suggestions
// =============================================================================

/// Semantic category of a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionKind {
    Command,
    File,
    Directory,
    Argument,
}

/// A candidate completion for partially typed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub value: String,
    pub kind: SuggestionKind,
    pub description: Option<String>,
}

impl Suggestion {
    pub fn new(value: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            value: value.into(),
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_line_constructors() {
        assert_eq!(
            OutputLine::text("hello").data,
            OutputLineData::Text("hello".to_string())
        );
        assert_eq!(
            OutputLine::error("boom").data,
            OutputLineData::Error("boom".to_string())
        );
        assert!(OutputLine::error("boom").is_error());
        assert!(!OutputLine::text("ok").is_error());
    }

    #[test]
    fn test_command_line_display() {
        let cmd = OutputLine::command("guest@portfolio:~", "ls -a");
        assert_eq!(cmd.to_string(), "guest@portfolio:~$ ls -a");
    }

    #[test]
    fn test_unique_ids() {
        let line1 = OutputLine::text("first");
        let line2 = OutputLine::text("second");
        let line3 = OutputLine::text("first");

        assert_ne!(line1.id, line2.id);
        assert_ne!(line1.id, line3.id);
        assert_eq!(line1, line3);
    }

    #[test]
    fn test_suggestion_builder() {
        let s = Suggestion::new("cd", SuggestionKind::Command).with_description("Change directory");
        assert_eq!(s.value, "cd");
        assert_eq!(s.description.as_deref(), Some("Change directory"));
        assert_eq!(Suggestion::new("x", SuggestionKind::File).description, None);
    }
}
