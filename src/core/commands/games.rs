//! Mini-game commands: play, exit, scores.

use async_trait::async_trait;

use crate::config::keys;
use crate::core::error::CommandError;
use crate::models::Game;

use super::{Command, CommandOutput, Completion, ShellContext};

const GAME_VALUES: &[(&str, &str)] = &[
    ("snake", "available"),
    ("tetris", "coming in v2.0"),
    ("pong", "coming in v2.0"),
];

pub struct Play;

#[async_trait(?Send)]
impl Command for Play {
    fn name(&self) -> &str {
        "play"
    }

    fn description(&self) -> &str {
        "Play a game"
    }

    fn completion(&self) -> Completion {
        Completion::Values(GAME_VALUES)
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage(format!(
                "play <{}>",
                Game::NAMES.join("|")
            )));
        };
        let game: Game = name
            .to_lowercase()
            .parse()
            .map_err(|_| CommandError::InvalidValue {
                kind: "game",
                value: name.clone(),
                expected: Game::NAMES,
            })?;

        if !game.is_available() {
            return Ok(CommandOutput::line(format!(
                "Game not available: {}. Try: snake",
                game
            )));
        }
        ctx.session.active_game = Some(game);
        Ok(CommandOutput::line("Launching Snake... (ESC to exit)"))
    }
}

pub struct Exit;

#[async_trait(?Send)]
impl Command for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    fn description(&self) -> &str {
        "Exit current game"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        ctx.session.active_game = None;
        Ok(CommandOutput::line("Exited game."))
    }
}

pub struct Scores;

#[async_trait(?Send)]
impl Command for Scores {
    fn name(&self) -> &str {
        "scores"
    }

    fn description(&self) -> &str {
        "Show high scores"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let best = ctx
            .store
            .get(keys::SNAKE_BEST)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&score| score > 0);
        let snake = match best {
            Some(score) => score.to_string(),
            None => "No scores yet".to_string(),
        };
        Ok(CommandOutput::lines([
            "🏆 Local High Scores".to_string(),
            "═══════════════════".to_string(),
            format!("Snake: {}", snake),
            String::new(),
            "Play games to set high scores!".to_string(),
            "Try: play snake".to_string(),
        ]))
    }
}
