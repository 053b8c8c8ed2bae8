//! Definition-time validation of a command forest.
//!
//! Validation enforces the structural invariants a declaration must satisfy
//! before it can be frozen into a [`CommandTree`](crate::CommandTree):
//! sibling-level name/alias uniqueness, reserved-name rejection, canonical
//! flag uniqueness per command, and the rule that a command cannot both own
//! subcommands and declare positional options.
//!
//! Validation is fail-fast: the first violation aborts tree construction and
//! leaves no partial state.
//!
//! # Examples
//!
//! ```
//! use cmdtree_core::{Command, validate_forest};
//!
//! let forest = vec![
//!     Command::new("db").with_subcommand(Command::new("migrate")),
//!     Command::new("status"),
//! ];
//! assert!(validate_forest(&forest).is_ok());
//!
//! // Same name twice at one level is rejected.
//! let forest = vec![Command::new("db"), Command::new("db")];
//! assert!(validate_forest(&forest).is_err());
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::command::Command;
use crate::option::{FLAG_PREFIX, HELP_FLAGS, VERSION_FLAGS, canonical_flag};

/// Names no command or alias may claim, compared case-insensitively.
const RESERVED_NAMES: [&str; 5] = ["help", "0", "1", "true", "false"];

/// Separator used when rendering a command's ancestor chain.
pub const PATH_SEPARATOR: &str = ".";

/// Structural violations found at definition time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A command or alias has an empty name.
    #[error("command name cannot be empty")]
    EmptyCommandName,

    /// A command or alias starts with the flag prefix.
    #[error("command name {name:?} cannot start with '-'")]
    FlagLikeCommandName {
        /// Offending name or alias.
        name: String,
    },

    /// A command or alias equals a reserved token.
    #[error("command name {name:?} is reserved")]
    ReservedCommandName {
        /// Offending name or alias.
        name: String,
    },

    /// Two sibling commands share a name or alias.
    #[error("conflicting command declarations: {first} and {second}")]
    DuplicateCommand {
        /// Dotted path of the command that claimed the name first.
        first: String,
        /// Dotted path of the command re-claiming it.
        second: String,
    },

    /// One command lists the same alias twice.
    #[error("command {command} declares duplicate alias {alias:?}")]
    DuplicateAlias {
        /// Dotted path of the declaring command.
        command: String,
        /// Repeated alias.
        alias: String,
    },

    /// An option name or alias contains `=`.
    #[error("option name {name:?} on {command} cannot contain '='")]
    OptionNameWithEquals {
        /// Dotted path of the declaring command.
        command: String,
        /// Offending name or alias.
        name: String,
    },

    /// An option claims one of the built-in help/version flags.
    #[error("option flag {flag} on {command} is reserved")]
    ReservedFlag {
        /// Dotted path of the declaring command.
        command: String,
        /// Canonical form of the offending flag.
        flag: String,
    },

    /// Two options on one command share a canonical name or alias.
    #[error("duplicate option flag {flag} on {command}")]
    DuplicateFlag {
        /// Dotted path of the declaring command.
        command: String,
        /// Canonical form of the colliding flag.
        flag: String,
    },

    /// One option spec lists the same alias twice.
    #[error("option {option} on {command} declares duplicate alias {alias:?}")]
    DuplicateOptionAlias {
        /// Dotted path of the declaring command.
        command: String,
        /// Key of the declaring option.
        option: String,
        /// Repeated alias.
        alias: String,
    },

    /// A command declares both subcommands and a positional option.
    #[error("command {command} has subcommands and cannot declare positional options")]
    PositionalUnderParent {
        /// Dotted path of the offending command.
        command: String,
    },
}

/// Validates a whole command forest, recursively.
///
/// Returns on the first violation; a forest that validates cleanly can be
/// assembled into a [`CommandTree`](crate::CommandTree).
pub fn validate_forest(forest: &[Command]) -> Result<(), ValidationError> {
    validate_level(forest, &[])
}

fn validate_level(siblings: &[Command], ancestors: &[String]) -> Result<(), ValidationError> {
    // name/alias -> dotted path of the command that claimed it
    let mut registry: HashMap<String, String> = HashMap::new();

    for command in siblings {
        let path = dotted_path(ancestors, &command.name);

        check_command_label(&command.name)?;
        let mut own_aliases: HashSet<&str> = HashSet::new();
        for alias in &command.aliases {
            check_command_label(alias)?;
            if !own_aliases.insert(alias.as_str()) {
                return Err(ValidationError::DuplicateAlias {
                    command: path.clone(),
                    alias: alias.clone(),
                });
            }
        }

        for label in std::iter::once(&command.name).chain(command.aliases.iter()) {
            if let Some(first) = registry.get(label.as_str()) {
                return Err(ValidationError::DuplicateCommand {
                    first: first.clone(),
                    second: path.clone(),
                });
            }
            registry.insert(label.clone(), path.clone());
        }

        validate_options(command, &path)?;

        if !command.subcommands.is_empty() && command.options.iter().any(|o| o.is_positional()) {
            return Err(ValidationError::PositionalUnderParent { command: path });
        }

        let mut chain = ancestors.to_vec();
        chain.push(command.name.clone());
        validate_level(&command.subcommands, &chain)?;
    }

    Ok(())
}

fn check_command_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyCommandName);
    }
    if label.starts_with(FLAG_PREFIX) {
        return Err(ValidationError::FlagLikeCommandName {
            name: label.to_string(),
        });
    }
    if RESERVED_NAMES
        .iter()
        .any(|reserved| label.eq_ignore_ascii_case(reserved))
    {
        return Err(ValidationError::ReservedCommandName {
            name: label.to_string(),
        });
    }
    Ok(())
}

fn validate_options(command: &Command, path: &str) -> Result<(), ValidationError> {
    // canonical flag -> claimed, across every spec on this command
    let mut seen: HashSet<String> = HashSet::new();

    for spec in &command.options {
        let Some((name, aliases)) = spec.declared_labels() else {
            continue;
        };

        let mut own_aliases: HashSet<&str> = HashSet::new();
        for alias in aliases {
            if !own_aliases.insert(alias.as_str()) {
                return Err(ValidationError::DuplicateOptionAlias {
                    command: path.to_string(),
                    option: spec.key().to_string(),
                    alias: alias.clone(),
                });
            }
        }

        for label in std::iter::once(name).chain(aliases.iter().map(String::as_str)) {
            if label.contains('=') {
                return Err(ValidationError::OptionNameWithEquals {
                    command: path.to_string(),
                    name: label.to_string(),
                });
            }
            let flag = canonical_flag(label);
            if HELP_FLAGS.contains(&flag.as_str()) || VERSION_FLAGS.contains(&flag.as_str()) {
                return Err(ValidationError::ReservedFlag {
                    command: path.to_string(),
                    flag,
                });
            }
            if !seen.insert(flag.clone()) {
                return Err(ValidationError::DuplicateFlag {
                    command: path.to_string(),
                    flag,
                });
            }
        }
    }

    Ok(())
}

pub(crate) fn dotted_path(ancestors: &[String], name: &str) -> String {
    if ancestors.is_empty() {
        name.to_string()
    } else {
        format!("{}{PATH_SEPARATOR}{name}", ancestors.join(PATH_SEPARATOR))
    }
}
