//! Shell and settings commands: help, clear, theme, sound, lang.

use async_trait::async_trait;

use crate::config::keys;
use crate::core::error::CommandError;
use crate::models::{Language, Theme};

use super::{Command, CommandOutput, Completion, ShellContext};

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub struct Help;

#[async_trait(?Send)]
impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["?"]
    }

    fn description(&self) -> &str {
        "Show available commands"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let commands = ctx.registry.list_available();
        let names: Vec<&str> = commands.iter().map(|c| c.name()).collect();
        Ok(CommandOutput::lines([
            "Available commands:".to_string(),
            names.join(", "),
        ]))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

pub struct Clear;

#[async_trait(?Send)]
impl Command for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn aliases(&self) -> &[&str] {
        &["cls"]
    }

    fn description(&self) -> &str {
        "Clear terminal output"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        ctx.clear_screen = true;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

const THEME_VALUES: &[(&str, &str)] = &[("dracula", "theme"), ("solarized-light", "theme")];

pub struct ThemeCmd;

#[async_trait(?Send)]
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }

    fn description(&self) -> &str {
        "Change theme"
    }

    fn completion(&self) -> Completion {
        Completion::Values(THEME_VALUES)
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let Some(value) = args.first() else {
            return Err(CommandError::Usage(format!(
                "theme <{}>",
                Theme::NAMES.join("|")
            )));
        };
        let theme: Theme = value.parse().map_err(|_| CommandError::InvalidValue {
            kind: "theme",
            value: value.clone(),
            expected: Theme::NAMES,
        })?;
        ctx.store.set(keys::THEME, theme.as_str())?;
        ctx.session.settings.theme = theme;
        Ok(CommandOutput::line(format!("Theme set to {}", theme)))
    }
}

// ---------------------------------------------------------------------------
// sound
// ---------------------------------------------------------------------------

const SOUND_VALUES: &[(&str, &str)] = &[("on", "sound"), ("off", "sound")];

pub struct Sound;

#[async_trait(?Send)]
impl Command for Sound {
    fn name(&self) -> &str {
        "sound"
    }

    fn description(&self) -> &str {
        "Toggle sound on/off"
    }

    fn completion(&self) -> Completion {
        Completion::Values(SOUND_VALUES)
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let enabled = match args.first().map(String::as_str) {
            Some("on") => true,
            Some("off") => false,
            _ => return Err(CommandError::Usage("sound <on|off>".to_string())),
        };
        ctx.store
            .set(keys::SOUND, if enabled { "on" } else { "off" })?;
        ctx.session.settings.sound_enabled = enabled;
        Ok(CommandOutput::line(if enabled {
            "Sound enabled"
        } else {
            "Sound disabled"
        }))
    }
}

// ---------------------------------------------------------------------------
// lang
// ---------------------------------------------------------------------------

const LANGUAGE_VALUES: &[(&str, &str)] = &[("en", "language"), ("ru", "language")];

pub struct Lang;

#[async_trait(?Send)]
impl Command for Lang {
    fn name(&self) -> &str {
        "lang"
    }

    fn description(&self) -> &str {
        "Change language"
    }

    fn completion(&self) -> Completion {
        Completion::Values(LANGUAGE_VALUES)
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let Some(code) = args.first() else {
            return Err(CommandError::Usage(format!(
                "lang <{}>",
                Language::CODES.join("|")
            )));
        };
        let language: Language = code.parse().map_err(|_| CommandError::InvalidValue {
            kind: "language",
            value: code.clone(),
            expected: Language::CODES,
        })?;
        ctx.store.set(keys::LANGUAGE, language.as_str())?;
        ctx.session.settings.language = language;
        Ok(CommandOutput::line(format!(
            "Language set to {}",
            language.as_str().to_uppercase()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::Fixture;
    use crate::core::storage::KeyValueStore;

    #[test]
    fn test_help_lists_distinct_sorted_names() {
        let mut fx = Fixture::new();
        let lines = fx.run(&Help, &[]).unwrap();
        assert_eq!(lines[0], "Available commands:");
        assert_eq!(
            lines[1],
            "about, cat, cd, clear, contact, date, echo, education, exit, experience, help, history, lang, ls, play, projects, pwd, resume, scores, skills, sound, theme, whoami"
        );
    }

    #[test]
    fn test_theme_sets_and_persists() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.run(&ThemeCmd, &["solarized-light"]).unwrap(),
            vec!["Theme set to solarized-light"]
        );
        assert_eq!(fx.session.settings.theme, Theme::SolarizedLight);
        assert_eq!(fx.store.get(keys::THEME).as_deref(), Some("solarized-light"));
    }

    #[test]
    fn test_theme_errors() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.run(&ThemeCmd, &[]).unwrap_err().to_string(),
            "Usage: theme <dracula|solarized-light>"
        );
        assert_eq!(
            fx.run(&ThemeCmd, &["neon"]).unwrap_err().to_string(),
            "Unknown theme: neon. Use: dracula, solarized-light"
        );
        assert_eq!(fx.store.get(keys::THEME), None);
    }

    #[test]
    fn test_sound() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run(&Sound, &["off"]).unwrap(), vec!["Sound disabled"]);
        assert!(!fx.session.settings.sound_enabled);
        assert_eq!(fx.store.get(keys::SOUND).as_deref(), Some("off"));
        assert_eq!(fx.run(&Sound, &["on"]).unwrap(), vec!["Sound enabled"]);
        assert!(matches!(
            fx.run(&Sound, &["loud"]),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn test_lang() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run(&Lang, &["ru"]).unwrap(), vec!["Language set to RU"]);
        assert_eq!(fx.session.settings.language, Language::Ru);
        assert_eq!(
            fx.run(&Lang, &["de"]).unwrap_err().to_string(),
            "Unknown language: de. Use: en, ru"
        );
        assert_eq!(
            fx.run(&Lang, &[]).unwrap_err().to_string(),
            "Usage: lang <en|ru>"
        );
    }
}
