//! Classic Unix commands: whoami, date, echo, history.

use async_trait::async_trait;

use crate::core::error::CommandError;
use crate::core::storage::CommandHistory;
use crate::utils::format::numbered;

use super::{Command, CommandOutput, ShellContext};

pub struct Whoami;

#[async_trait(?Send)]
impl Command for Whoami {
    fn name(&self) -> &str {
        "whoami"
    }

    fn description(&self) -> &str {
        "Show current user"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::line(ctx.session.settings.username.clone()))
    }
}

pub struct Date;

#[async_trait(?Send)]
impl Command for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn description(&self) -> &str {
        "Current date/time"
    }

    async fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let now = chrono::Local::now();
        Ok(CommandOutput::line(
            now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string(),
        ))
    }
}

pub struct Echo;

#[async_trait(?Send)]
impl Command for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo arguments"
    }

    async fn execute(
        &self,
        args: &[String],
        _ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::line(args.join(" ")))
    }
}

/// Reads the persisted history, so it reflects what a reload would show.
pub struct History;

#[async_trait(?Send)]
impl Command for History {
    fn name(&self) -> &str {
        "history"
    }

    fn description(&self) -> &str {
        "Show last commands"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let entries = CommandHistory::read(ctx.store);
        if entries.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Lines(numbered(&entries)))
    }
}
