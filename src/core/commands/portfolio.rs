//! Portfolio commands: about, skills, projects, contact, resume, experience,
//! education.
//!
//! Each one is a shortcut over the bundled filesystem, so editing the tree
//! edits what these print.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::CommandError;
use crate::models::{Language, NodeKind};

use super::{Command, CommandOutput, Completion, ShellContext};

const ABOUT_FILE: &str = "/home/about.txt";
const SKILLS_FILE: &str = "/home/skills.json";
const EXPERIENCE_FILE: &str = "/home/experience.md";
const EDUCATION_FILE: &str = "/home/education.md";
const PROJECTS_DIR: &str = "/projects";
const CONTACT_DIR: &str = "/contact";

const RESUME_VALUES: &[(&str, &str)] = &[("en", "English CV"), ("ru", "Russian CV")];

fn read_file<'a>(
    ctx: &ShellContext<'a>,
    command: &str,
    path: &str,
) -> Result<&'a str, CommandError> {
    ctx.fs.read(path).ok_or_else(|| CommandError::NoSuchFile {
        command: command.to_string(),
        path: path.to_string(),
    })
}

/// `key: value` lines for a flat JSON object. Arrays are comma-joined.
///
/// Returns `None` when the text is not a JSON object.
fn object_lines(json: &str) -> Option<Vec<String>> {
    let Value::Object(map) = serde_json::from_str::<Value>(json).ok()? else {
        return None;
    };
    let lines = map
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                other => other.to_string(),
            };
            format!("  {}: {}", key, rendered)
        })
        .collect();
    Some(lines)
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

pub struct About;

#[async_trait(?Send)]
impl Command for About {
    fn name(&self) -> &str {
        "about"
    }

    fn description(&self) -> &str {
        "About the developer"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let content = read_file(ctx, self.name(), ABOUT_FILE)?;
        Ok(CommandOutput::lines(content.split('\n')))
    }
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

pub struct Skills;

#[async_trait(?Send)]
impl Command for Skills {
    fn name(&self) -> &str {
        "skills"
    }

    fn description(&self) -> &str {
        "Skills overview"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let content = read_file(ctx, self.name(), SKILLS_FILE)?;
        let body = object_lines(content)
            .unwrap_or_else(|| content.split('\n').map(str::to_string).collect());
        Ok(CommandOutput::lines(
            std::iter::once("Skills:".to_string()).chain(body),
        ))
    }
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

pub struct Projects;

#[async_trait(?Send)]
impl Command for Projects {
    fn name(&self) -> &str {
        "projects"
    }

    fn description(&self) -> &str {
        "Projects list"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let entries = ctx
            .fs
            .list(PROJECTS_DIR, false)
            .ok_or_else(|| CommandError::NotFound {
                command: self.name().to_string(),
                path: PROJECTS_DIR.to_string(),
            })?;

        let names: Vec<String> = entries
            .iter()
            .filter(|n| n.kind() == NodeKind::Directory)
            .map(|n| format!("  {}/", n.name))
            .collect();
        if names.is_empty() {
            return Ok(CommandOutput::line("No projects yet."));
        }
        let mut lines = vec!["Projects:".to_string()];
        lines.extend(names);
        lines.push(format!("Use 'cd {}/<name>' for details.", PROJECTS_DIR));
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

pub struct Contact;

#[async_trait(?Send)]
impl Command for Contact {
    fn name(&self) -> &str {
        "contact"
    }

    fn description(&self) -> &str {
        "Contact info"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let entries = ctx
            .fs
            .list(CONTACT_DIR, false)
            .ok_or_else(|| CommandError::NotFound {
                command: self.name().to_string(),
                path: CONTACT_DIR.to_string(),
            })?;

        let mut lines = vec!["Contact:".to_string()];
        for node in entries {
            let Some(content) = node.content() else {
                continue;
            };
            match object_lines(content) {
                Some(fields) => lines.extend(fields),
                None => {
                    // email.txt -> "email: ..."
                    let label = node.name.split('.').next().unwrap_or(&node.name);
                    lines.push(format!("  {}: {}", label, content.trim()));
                }
            }
        }
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// resume
// ---------------------------------------------------------------------------

pub struct Resume;

#[async_trait(?Send)]
impl Command for Resume {
    fn name(&self) -> &str {
        "resume"
    }

    fn description(&self) -> &str {
        "Download CV"
    }

    fn completion(&self) -> Completion {
        Completion::Values(RESUME_VALUES)
    }

    async fn execute(
        &self,
        args: &[String],
        _ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let language: Language = match args.first() {
            None => Language::En,
            Some(code) => code
                .to_lowercase()
                .parse()
                .map_err(|_| CommandError::InvalidValue {
                    kind: "language",
                    value: code.clone(),
                    expected: Language::CODES,
                })?,
        };
        Ok(CommandOutput::line(format!(
            "Downloading resume-{}.pdf...",
            language.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// experience
// ---------------------------------------------------------------------------

pub struct Experience;

#[async_trait(?Send)]
impl Command for Experience {
    fn name(&self) -> &str {
        "experience"
    }

    fn description(&self) -> &str {
        "Work experience"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let content = read_file(ctx, self.name(), EXPERIENCE_FILE)?;
        Ok(CommandOutput::lines(content.split('\n')))
    }
}

// ---------------------------------------------------------------------------
// education
// ---------------------------------------------------------------------------

pub struct Education;

#[async_trait(?Send)]
impl Command for Education {
    fn name(&self) -> &str {
        "education"
    }

    fn description(&self) -> &str {
        "Education"
    }

    async fn execute(
        &self,
        _args: &[String],
        ctx: &mut ShellContext<'_>,
    ) -> Result<CommandOutput, CommandError> {
        let content = read_file(ctx, self.name(), EDUCATION_FILE)?;
        Ok(CommandOutput::lines(content.split('\n')))
    }
}
