//! Filesystem commands: ls, cd, cat, pwd.

use async_trait::async_trait;

use crate::core::error::CommandError;
use crate::core::filesystem::display_path;
use crate::models::NodeKind;
use crate::utils::format::two_columns;

use super::{Command, CommandOutput, Completion, ShellContext};

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

pub struct Ls;

#[async_trait(?Send)]
impl Command for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn description(&self) -> &str {
        "List directory contents"
    }

    fn completion(&self) -> Completion {
        Completion::Directories
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let show_hidden = args.iter().any(|a| a == "-a" || a == "-la");
        let target = args.iter().find(|a| !a.starts_with('-'));
        let (path, shown) = match target {
            Some(t) => (ctx.absolute(t), t.clone()),
            None => (ctx.cwd(), ctx.session.current_path.clone()),
        };

        match ctx.fs.kind(&path) {
            None => return Err(CommandError::not_found("ls", &shown)),
            Some(NodeKind::File) => return Err(CommandError::not_a_directory("ls", &shown)),
            Some(NodeKind::Directory) => {}
        }

        let names: Vec<String> = ctx
            .fs
            .list(&path, show_hidden)
            .unwrap_or_default()
            .into_iter()
            .map(|node| {
                if node.is_dir() {
                    format!("{}/", node.name)
                } else {
                    node.name.clone()
                }
            })
            .collect();

        if names.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Lines(two_columns(&names)))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

pub struct Cd;

#[async_trait(?Send)]
impl Command for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn description(&self) -> &str {
        "Change directory"
    }

    fn completion(&self) -> Completion {
        Completion::Directories
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let Some(to) = args.first() else {
            return Err(CommandError::Usage("cd <path>".to_string()));
        };
        let next = ctx.absolute(to);
        match ctx.fs.kind(&next) {
            Some(NodeKind::Directory) => {
                ctx.session.current_path = display_path(&next);
                Ok(CommandOutput::None)
            }
            Some(NodeKind::File) => Err(CommandError::not_a_directory("cd", to)),
            None => Err(CommandError::not_found("cd", to)),
        }
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

pub struct Cat;

#[async_trait(?Send)]
impl Command for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn aliases(&self) -> &[&str] {
        &["less", "more"]
    }

    fn description(&self) -> &str {
        "Print file content"
    }

    fn completion(&self) -> Completion {
        Completion::Files
    }

    async fn execute(
        &self,
        args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let Some(target) = args.first() else {
            return Err(CommandError::Usage("cat <file>".to_string()));
        };
        // directories are not readable files
        let path = ctx.absolute(target);
        match ctx.fs.read(&path) {
            Some(content) => Ok(CommandOutput::lines(content.split('\n'))),
            None => Err(CommandError::NoSuchFile {
                command: "cat".to_string(),
                path: target.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

pub struct Pwd;

#[async_trait(?Send)]
impl Command for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn description(&self) -> &str {
        "Print working directory"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::line(ctx.session.current_path.clone()))
    }
}
