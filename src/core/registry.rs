//! Command registry: name and alias lookup, listing, tokenizing.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::core::commands::Command;
use crate::core::error::RegistryError;

/// What [`CommandRegistry::register`] does when a key is already bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// The newer command replaces the earlier binding.
    #[default]
    Permissive,
    /// The registration is rejected and nothing is bound.
    Strict,
}

/// Maps lower-cased names and aliases to commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Rc<dyn Command>>,
    policy: RegistrationPolicy,
}

impl CommandRegistry {
    pub fn new(policy: RegistrationPolicy) -> Self {
        Self {
            commands: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Bind a command under its name and every alias.
    ///
    /// Under [`RegistrationPolicy::Strict`] all keys are checked before any is
    /// bound, so a rejected command leaves the registry untouched.
    pub fn register(&mut self, command: Rc<dyn Command>) -> Result<(), RegistryError> {
        let keys: Vec<String> = std::iter::once(command.name())
            .chain(command.aliases().iter().copied())
            .map(str::to_lowercase)
            .collect();

        if self.policy == RegistrationPolicy::Strict {
            for key in &keys {
                if let Some(existing) = self.commands.get(key) {
                    return Err(RegistryError::Conflict {
                        key: key.clone(),
                        existing: existing.name().to_string(),
                    });
                }
            }
        }

        for key in keys {
            if let Some(previous) = self.commands.insert(key.clone(), Rc::clone(&command)) {
                debug!(
                    "command key '{}' rebound from '{}' to '{}'",
                    key,
                    previous.name(),
                    command.name()
                );
            }
        }
        Ok(())
    }

    pub fn register_all(
        &mut self,
        commands: impl IntoIterator<Item = Rc<dyn Command>>,
    ) -> Result<(), RegistryError> {
        commands.into_iter().try_for_each(|c| self.register(c))
    }

    /// Look up a command by name or alias, ignoring case.
    pub fn get(&self, key: &str) -> Option<Rc<dyn Command>> {
        self.commands.get(&key.to_lowercase()).cloned()
    }

    /// Distinct, non-hidden commands sorted by name.
    pub fn list_available(&self) -> Vec<Rc<dyn Command>> {
        let mut distinct: Vec<Rc<dyn Command>> = Vec::new();
        for command in self.commands.values() {
            if command.hidden() || distinct.iter().any(|c| Rc::ptr_eq(c, command)) {
                continue;
            }
            distinct.push(Rc::clone(command));
        }
        distinct.sort_by(|a, b| a.name().cmp(b.name()));
        distinct
    }

    /// Number of bound keys, names and aliases included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Split a raw line into a lower-cased command key and its arguments.
///
/// Returns `None` for blank input.
pub fn tokenize(line: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = line.split_whitespace();
    let key = tokens.next()?.to_lowercase();
    Some((key, tokens.map(str::to_string).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::{
        Cat, CommandOutput, Echo, Help, ShellContext, builtin_commands,
    };
    use crate::core::error::CommandError;
    use async_trait::async_trait;

    struct Secret;

    #[async_trait(?Send)]
    impl Command for Secret {
        fn name(&self) -> &str {
            "sudo"
        }

        fn description(&self) -> &str {
            "Nice try"
        }

        fn hidden(&self) -> bool {
            true
        }

        async fn execute(
            &self,
            _args: &[String],
            _ctx: &mut ShellContext<'_>,
        ) -> Result<CommandOutput, CommandError> {
            Ok(CommandOutput::line("Permission denied"))
        }
    }

    /// Claims `echo` and one of `cat`'s aliases.
    struct Shout;

    #[async_trait(?Send)]
    impl Command for Shout {
        fn name(&self) -> &str {
            "echo"
        }

        fn aliases(&self) -> &[&str] {
            &["more"]
        }

        fn description(&self) -> &str {
            "Echo loudly"
        }

        async fn execute(
            &self,
            args: &[String],
            _ctx: &mut ShellContext<'_>,
        ) -> Result<CommandOutput, CommandError> {
            Ok(CommandOutput::line(args.join(" ").to_uppercase()))
        }
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize(""), None);
        assert_eq!(tokenize("   \t "), None);
        assert_eq!(
            tokenize("  LS   -a  /Home "),
            Some(("ls".to_string(), vec!["-a".to_string(), "/Home".to_string()]))
        );
    }

    #[test]
    fn test_get_by_name_and_alias_case_insensitive() {
        let mut registry = CommandRegistry::default();
        registry.register_all(builtin_commands()).unwrap();

        let cat = registry.get("cat").unwrap();
        for key in ["less", "MORE", "Cat"] {
            assert!(Rc::ptr_eq(&cat, &registry.get(key).unwrap()));
        }
        assert_eq!(registry.get("?").unwrap().name(), "help");
        assert!(registry.get("vim").is_none());
    }

    #[test]
    fn test_aliases_listed_once() {
        let mut registry = CommandRegistry::default();
        registry.register_all(builtin_commands()).unwrap();
        registry.register(Rc::new(Secret)).unwrap();

        let names: Vec<String> = registry
            .list_available()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names.len(), 23);
        assert_eq!(names.iter().filter(|n| *n == "cat").count(), 1);
        assert!(!names.contains(&"sudo".to_string()));
        assert!(!names.contains(&"less".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        // hidden commands still dispatch
        assert!(registry.get("sudo").is_some());
    }

    #[test]
    fn test_permissive_overwrites() {
        let mut registry = CommandRegistry::default();
        registry.register(Rc::new(Echo)).unwrap();
        registry.register(Rc::new(Cat)).unwrap();
        registry.register(Rc::new(Shout)).unwrap();

        assert_eq!(registry.get("echo").unwrap().description(), "Echo loudly");
        assert_eq!(registry.get("more").unwrap().description(), "Echo loudly");
        assert_eq!(registry.get("less").unwrap().name(), "cat");
        // the first echo lost its only key
        assert_eq!(registry.list_available().len(), 2);
    }

    #[test]
    fn test_strict_rejects_without_partial_binding() {
        let mut registry = CommandRegistry::new(RegistrationPolicy::Strict);
        registry.register(Rc::new(Cat)).unwrap();
        registry.register(Rc::new(Help)).unwrap();
        let before = registry.len();

        let err = registry.register(Rc::new(Shout)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Conflict {
                key: "more".to_string(),
                existing: "cat".to_string(),
            }
        );
        assert_eq!(registry.len(), before);
        assert!(registry.get("echo").is_none());
    }
}
