//! Runtime error taxonomy.
//!
//! Everything the engine can reject after definition time: resolution
//! failures, malformed or invalid option values, and the two aggregate
//! errors collected over a full parse pass. Structural definition errors
//! live in `cmdtree-core` and never reach this type.

use std::fmt;

use thiserror::Error;

/// One entry of a [`RunError::MissingRequired`] aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingOption {
    /// Canonical flag, or the declaration key for positionals.
    pub name: String,
    /// Canonical alias spellings, empty for positionals.
    pub aliases: Vec<String>,
}

impl fmt::Display for MissingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.aliases.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} (aliases: {})", self.name, self.aliases.join(", "))
        }
    }
}

fn join_missing(options: &[MissingOption]) -> String {
    options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while resolving a command or parsing its options.
///
/// The aggregate variants ([`MissingRequired`](RunError::MissingRequired),
/// [`UnrecognizedOptions`](RunError::UnrecognizedOptions)) are collected
/// over the whole token scan and list every violation found; everything
/// else is raised at the offending token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// No top-level command matched the first candidate token.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A candidate failed to match while descending below `path`.
    #[error("unknown subcommand of {path}: {name}")]
    UnknownSubcommand {
        /// Dotted path of the deepest resolved ancestor.
        path: String,
        /// The token that matched nothing.
        name: String,
    },

    /// A boolean flag received an embedded value that is not a boolean
    /// literal.
    #[error("flag {flag} expects a boolean, got {value:?}")]
    InvalidBooleanValue {
        /// Flag as written on the command line.
        flag: String,
        /// The rejected value.
        value: String,
    },

    /// A string flag was given no value, embedded or following.
    #[error("flag {flag} expects a value")]
    MissingStringValue {
        /// Flag as written on the command line.
        flag: String,
    },

    /// A number flag was given no value, embedded or following.
    #[error("flag {flag} expects a numeric value")]
    MissingNumberValue {
        /// Flag as written on the command line.
        flag: String,
    },

    /// A number flag's value failed numeric parsing.
    #[error("flag {flag} expects a number, got {value:?}")]
    NumberNotNumeric {
        /// Flag as written on the command line.
        flag: String,
        /// The rejected value.
        value: String,
    },

    /// An integer-only flag received a non-integral number.
    #[error("flag {flag} expects an integer, got {value}")]
    NotAnInteger {
        /// Flag as written on the command line.
        flag: String,
        /// The rejected value.
        value: f64,
    },

    /// A numeric value fell below the declared minimum.
    #[error("flag {flag} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Flag as written on the command line.
        flag: String,
        /// Declared inclusive lower bound.
        min: f64,
        /// The rejected value.
        value: f64,
    },

    /// A numeric value exceeded the declared maximum.
    #[error("flag {flag} must be at most {max}, got {value}")]
    AboveMaximum {
        /// Flag as written on the command line.
        flag: String,
        /// Declared inclusive upper bound.
        max: f64,
        /// The rejected value.
        value: f64,
    },

    /// A value is not in the option's allowed set.
    #[error("invalid value {value:?} for {flag}: expected one of {}", .allowed.join(", "))]
    ChoiceViolation {
        /// Flag or positional key the value was supplied for.
        flag: String,
        /// The rejected value.
        value: String,
        /// The declared allowed set.
        allowed: Vec<String>,
    },

    /// Required options still undefined after defaulting, in declaration
    /// order. Supersedes [`UnrecognizedOptions`](RunError::UnrecognizedOptions)
    /// when both would apply.
    #[error("missing required options: {}", join_missing(.0))]
    MissingRequired(Vec<MissingOption>),

    /// Flags that matched no declared option, in first-seen order.
    #[error("unrecognized options: {}", .0.join(", "))]
    UnrecognizedOptions(Vec<String>),

    /// A user callback (hook, transform, or handler) failed.
    #[error("command failed: {message}")]
    Handler {
        /// Message carried by the callback's error.
        message: String,
    },
}

impl RunError {
    /// Wraps a user-callback failure.
    pub fn from_handler(error: cmdtree_core::HandlerError) -> Self {
        RunError::Handler {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_message_lists_every_entry() {
        let err = RunError::MissingRequired(vec![
            MissingOption {
                name: "--remote".to_string(),
                aliases: vec!["-r".to_string()],
            },
            MissingOption {
                name: "target".to_string(),
                aliases: Vec::new(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "missing required options: --remote (aliases: -r), target"
        );
    }

    #[test]
    fn test_unrecognized_message_lists_every_flag() {
        let err = RunError::UnrecognizedOptions(vec![
            "--nope".to_string(),
            "--also-nope".to_string(),
        ]);
        assert_eq!(err.to_string(), "unrecognized options: --nope, --also-nope");
    }

    #[test]
    fn test_choice_violation_message_names_allowed_set() {
        let err = RunError::ChoiceViolation {
            flag: "--mode".to_string(),
            value: "c".to_string(),
            allowed: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"c\" for --mode: expected one of a, b"
        );
    }
}
