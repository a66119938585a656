//! Application configuration.
//!
//! Centralizes the constants used throughout the terminal and the
//! [`ShellConfig`] file format read by the native binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::registry::RegistrationPolicy;

// =============================================================================
// Filesystem
// =============================================================================

/// Stock portfolio tree, loaded at compile time.
pub const DEFAULT_FILESYSTEM: &str = include_str!("../assets/filesystem.json");

/// Absolute path of the home directory.
pub const HOME_DIR: &str = "/home";

/// Shorthand for [`HOME_DIR`] accepted in paths and shown in the prompt.
pub const HOME_SYMBOL: &str = "~";

// =============================================================================
// Session Defaults
// =============================================================================

pub const DEFAULT_USERNAME: &str = "guest";

pub const DEFAULT_HOSTNAME: &str = "portfolio";

/// Maximum number of command history entries to keep.
pub const MAX_COMMAND_HISTORY: usize = 20;

/// Maximum number of transcript lines to keep.
pub const MAX_TRANSCRIPT_LINES: usize = 1000;

/// Handler timeout in milliseconds. `0` disables the timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

// =============================================================================
// Storage Keys
// =============================================================================

pub mod keys {
    pub const HISTORY: &str = "history";
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "lang";
    pub const SOUND: &str = "sound";
    pub const USERNAME: &str = "username";
    pub const SNAKE_BEST: &str = "snake_best";
}

// =============================================================================
// Shell Configuration File
// =============================================================================

/// Runtime configuration, usually read from a TOML file.
///
/// Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Username used when the store has none.
    pub username: String,
    pub hostname: String,
    pub history_limit: usize,
    pub timeout_ms: u64,
    /// Reject duplicate command names instead of overwriting them.
    pub strict_registration: bool,
    /// JSON filesystem document replacing the stock tree.
    pub filesystem: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            history_limit: MAX_COMMAND_HISTORY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            strict_registration: false,
            filesystem: None,
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn registration_policy(&self) -> RegistrationPolicy {
        if self.strict_registration {
            RegistrationPolicy::Strict
        } else {
            RegistrationPolicy::Permissive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.timeout(), Some(Duration::from_millis(5000)));
        assert_eq!(config.registration_policy(), RegistrationPolicy::Permissive);
    }

    #[test]
    fn test_partial_config() {
        let config = ShellConfig::from_toml_str(
            r#"
            username = "visitor"
            timeout_ms = 0
            strict_registration = true
            filesystem = "tree.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.username, "visitor");
        assert_eq!(config.hostname, DEFAULT_HOSTNAME);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.registration_policy(), RegistrationPolicy::Strict);
        assert_eq!(config.filesystem, Some(PathBuf::from("tree.json")));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ShellConfig::from_toml_str("history_limit = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ShellConfig::load(Path::new("/nonexistent/termfolio.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
