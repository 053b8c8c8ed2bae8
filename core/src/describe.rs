//! Read-only introspection of a validated tree.
//!
//! [`CommandDescription`] is the serializable projection of a command: its
//! names, visibility, option specs, and subcommands, recursively — everything
//! except the opaque callables. A description can be turned back into a
//! declaration with [`CommandDescription::into_command`], so a described
//! forest re-validates cleanly.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::option::OptionSpec;
use crate::tree::{CommandId, CommandTree};

/// Serializable description of one command and its subtree.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{BooleanOpt, Command, CommandTree};
///
/// let tree = CommandTree::build(vec![
///     Command::new("db")
///         .with_description("Database maintenance")
///         .with_subcommand(Command::new("migrate").with_option(BooleanOpt::new("dry-run"))),
/// ])
/// .unwrap();
///
/// let forest = tree.describe();
/// assert_eq!(forest[0].name, "db");
/// assert_eq!(forest[0].subcommands[0].name, "migrate");
///
/// let json = serde_json::to_string(&forest).unwrap();
/// assert!(json.contains("\"dry-run\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescription {
    /// Command name.
    pub name: String,
    /// Alternative names.
    pub aliases: Vec<String>,
    /// Short description, if declared.
    pub description: Option<String>,
    /// Whether the command is excluded from global help.
    pub hidden: bool,
    /// Option specs in declaration order.
    pub options: Vec<OptionSpec>,
    /// Described subcommands, recursively.
    pub subcommands: Vec<CommandDescription>,
}

impl CommandDescription {
    /// Rebuilds a declaration (without callables) from this description.
    pub fn into_command(self) -> Command {
        let mut command = Command::new(&self.name);
        command.aliases = self.aliases;
        command.description = self.description;
        command.hidden = self.hidden;
        command.options = self.options;
        command.subcommands = self
            .subcommands
            .into_iter()
            .map(CommandDescription::into_command)
            .collect();
        command
    }
}

impl CommandTree {
    /// Describes every root command and its subtree, in declaration order.
    pub fn describe(&self) -> Vec<CommandDescription> {
        self.roots()
            .iter()
            .map(|id| self.describe_command(*id))
            .collect()
    }

    /// Describes one command and its subtree.
    pub fn describe_command(&self, id: CommandId) -> CommandDescription {
        let command = self.command(id);
        CommandDescription {
            name: command.name.clone(),
            aliases: command.aliases.clone(),
            description: command.description.clone(),
            hidden: command.hidden,
            options: command.options.clone(),
            subcommands: self
                .children(id)
                .iter()
                .map(|child| self.describe_command(*child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{NumberOpt, StringOpt};
    use crate::validate::validate_forest;

    fn sample_forest() -> Vec<Command> {
        vec![
            Command::new("push")
                .with_description("Upload changes")
                .with_option(StringOpt::new("remote").with_alias("r"))
                .with_option(NumberOpt::new("retries").integer_only().with_max(5.0)),
            Command::new("internal").hidden(),
        ]
    }

    #[test]
    fn test_describe_round_trips_through_validation() {
        let tree = CommandTree::build(sample_forest()).unwrap();
        let described = tree.describe();

        let rebuilt: Vec<Command> = described
            .into_iter()
            .map(CommandDescription::into_command)
            .collect();
        assert!(validate_forest(&rebuilt).is_ok());

        // and the rebuilt forest freezes into an identical shape
        let rebuilt_tree = CommandTree::build(rebuilt).unwrap();
        assert_eq!(rebuilt_tree.describe(), tree.describe());
    }

    #[test]
    fn test_describe_round_trips_through_json() {
        let tree = CommandTree::build(sample_forest()).unwrap();
        let described = tree.describe();

        let json = serde_json::to_string(&described).unwrap();
        let parsed: Vec<CommandDescription> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, described);
    }

    #[test]
    fn test_describe_preserves_visibility_and_specs() {
        let tree = CommandTree::build(sample_forest()).unwrap();
        let described = tree.describe();

        assert!(!described[0].hidden);
        assert!(described[1].hidden);
        assert_eq!(described[0].options.len(), 2);
        assert_eq!(described[0].options[0].key(), "remote");
    }
}
