//! Per-terminal session state: working directory, settings and active game.

use std::fmt;
use std::str::FromStr;

use crate::config::HOME_SYMBOL;

// =============================================================================
// Closed Enumerations
// =============================================================================

/// Color theme of the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dracula,
    SolarizedLight,
}

impl Theme {
    pub const NAMES: &'static [&'static str] = &["dracula", "solarized-light"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dracula => "dracula",
            Self::SolarizedLight => "solarized-light",
        }
    }
}

/// Interface language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub const CODES: &'static [&'static str] = &["en", "ru"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

/// Mini-games reachable through `play`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Game {
    Snake,
    Tetris,
    Pong,
}

impl Game {
    pub const NAMES: &'static [&'static str] = &["snake", "tetris", "pong"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Tetris => "tetris",
            Self::Pong => "pong",
        }
    }

    /// Only snake ships today; the others are announced.
    pub fn is_available(self) -> bool {
        matches!(self, Self::Snake)
    }
}

/// Error returned when a string is outside a closed enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

macro_rules! impl_str_enum {
    ($ty:ty, $($name:literal => $variant:expr),+ $(,)?) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($variant),)+
                    other => Err(UnknownVariant(other.to_string())),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_str_enum!(Theme, "dracula" => Theme::Dracula, "solarized-light" => Theme::SolarizedLight);
impl_str_enum!(Language, "en" => Language::En, "ru" => Language::Ru);
impl_str_enum!(Game, "snake" => Game::Snake, "tetris" => Game::Tetris, "pong" => Game::Pong);

// =============================================================================
// Settings & Session
// =============================================================================

/// User-facing preferences. Persisted through the key-value store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
    pub language: Language,
    pub sound_enabled: bool,
    pub username: String,
    pub hostname: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: Language::default(),
            sound_enabled: true,
            username: crate::config::DEFAULT_USERNAME.to_string(),
            hostname: crate::config::DEFAULT_HOSTNAME.to_string(),
        }
    }
}

/// Mutable state of one interactive terminal.
///
/// Cloned before every command so a failed command can be rolled back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// `~` for the home directory, otherwise an absolute normalized path.
    pub current_path: String,
    pub settings: Settings,
    pub active_game: Option<Game>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            current_path: HOME_SYMBOL.to_string(),
            settings,
            active_game: None,
        }
    }

    /// Prompt string, e.g. `guest@portfolio:~`.
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}",
            self.settings.username, self.settings.hostname, self.current_path
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
