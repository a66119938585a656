//! Error types for the terminal core.
//!
//! - [`CommandError`] - failures of a single command, rendered as output lines
//! - [`RegistryError`] - rejected command registrations (strict policy)
//! - [`FsError`] - invalid filesystem documents
//! - [`StorageError`] - key-value persistence failures
//! - [`ConfigError`] - unreadable or malformed configuration files

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// A failure of a single command.
///
/// Never escapes dispatch: the shell renders it as one output line and
/// restores the session to its state before the command ran.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or malformed arguments.
    #[error("Usage: {0}")]
    Usage(String),

    /// Path does not resolve.
    #[error("{command}: {path}: No such file or directory")]
    NotFound { command: String, path: String },

    /// File-reading command given a path that is not a file.
    #[error("{command}: {path}: No such file")]
    NoSuchFile { command: String, path: String },

    /// Directory expected, file found.
    #[error("{command}: {path}: Not a directory")]
    NotADirectory { command: String, path: String },

    /// Argument outside a closed set.
    #[error("Unknown {kind}: {value}. Use: {}", .expected.join(", "))]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    #[error("{command}: timed out after {} ms", .limit.as_millis())]
    TimedOut { command: String, limit: Duration },

    #[error("{command}: internal error: {message}")]
    Panicked { command: String, message: String },

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    pub fn not_found(command: &str, path: &str) -> Self {
        Self::NotFound {
            command: command.to_string(),
            path: path.to_string(),
        }
    }

    pub fn not_a_directory(command: &str, path: &str) -> Self {
        Self::NotADirectory {
            command: command.to_string(),
            path: path.to_string(),
        }
    }
}

/// Registration rejected under [`RegistrationPolicy::Strict`].
///
/// [`RegistrationPolicy::Strict`]: crate::core::registry::RegistrationPolicy::Strict
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command key '{key}' is already bound to '{existing}'")]
    Conflict { key: String, existing: String },
}

/// Invalid filesystem document.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("root node must be a directory")]
    RootNotDirectory,

    #[error("root node must be named '/', found '{0}'")]
    InvalidRootName(String),

    #[error("invalid node name '{name}' in '{parent}'")]
    InvalidName { parent: String, name: String },

    #[error("duplicate node name '{name}' in '{parent}'")]
    DuplicateName { parent: String, name: String },

    #[error("failed to parse filesystem document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-value persistence failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage not available")]
    Unavailable,

    #[error("failed to write '{0}' to storage")]
    WriteFailed(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_messages() {
        assert_eq!(
            CommandError::Usage("cd <path>".to_string()).to_string(),
            "Usage: cd <path>"
        );
        assert_eq!(
            CommandError::not_found("cd", "nowhere").to_string(),
            "cd: nowhere: No such file or directory"
        );
        assert_eq!(
            CommandError::not_a_directory("cd", "about.txt").to_string(),
            "cd: about.txt: Not a directory"
        );
        assert_eq!(
            CommandError::NoSuchFile {
                command: "cat".to_string(),
                path: "nope.txt".to_string()
            }
            .to_string(),
            "cat: nope.txt: No such file"
        );
    }

    #[test]
    fn test_invalid_value_lists_expected() {
        let err = CommandError::InvalidValue {
            kind: "theme",
            value: "monokai".to_string(),
            expected: &["dracula", "solarized-light"],
        };
        assert_eq!(
            err.to_string(),
            "Unknown theme: monokai. Use: dracula, solarized-light"
        );
    }

    #[test]
    fn test_timeout_message() {
        let err = CommandError::TimedOut {
            command: "slow".to_string(),
            limit: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "slow: timed out after 250 ms");
    }

    #[test]
    fn test_registry_error_message() {
        let err = RegistryError::Conflict {
            key: "ll".to_string(),
            existing: "ls".to_string(),
        };
        assert_eq!(err.to_string(), "command key 'll' is already bound to 'ls'");
    }
}
