//! Test-mode entry point.
//!
//! [`simulate`] runs the option parser against a single command and a
//! shell-style argument string — no tree resolution, no events, no process
//! exit — and returns the outcome as data. Intended for test harnesses that
//! want to assert on parses and invoke handlers themselves.

use std::fmt;

use cmdtree_core::{Command, Handler, Values};

use crate::error::RunError;
use crate::options::{ParseOutcome, parse_options};
use crate::tokenize::split_line;

/// Outcome of a simulated invocation; errors are returned, never raised.
pub enum Trial {
    /// The parse succeeded; the command's handler (if any) is handed back
    /// for the caller to invoke.
    Ready {
        /// The command's handler, cloned for invocation by the caller.
        handler: Option<Handler>,
        /// The parsed option map.
        options: Values,
    },
    /// A help flag was present.
    Help,
    /// A version flag was present.
    Version,
    /// The parse was rejected.
    Failed(RunError),
}

impl fmt::Debug for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trial::Ready { handler, options } => f
                .debug_struct("Ready")
                .field("handler", &handler.as_ref().map(|_| "<handler>"))
                .field("options", options)
                .finish(),
            Trial::Help => write!(f, "Help"),
            Trial::Version => write!(f, "Version"),
            Trial::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// Tokenizes `line` and parses it against `command`'s options.
///
/// Undefined keys are kept in the map (with null values), matching what a
/// handler would see from the pipeline's default configuration.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Command, NumberOpt};
/// use cmdtree_engine::{Trial, simulate};
///
/// let command = Command::new("run")
///     .with_option(NumberOpt::new("jobs").integer_only())
///     .with_handler(|_| async { Ok(()) });
///
/// match simulate(&command, "--jobs=4") {
///     Trial::Ready { handler, options } => {
///         assert!(handler.is_some());
///         assert_eq!(options.number("jobs"), Some(4.0));
///     }
///     other => panic!("unexpected outcome: {other:?}"),
/// }
///
/// assert!(matches!(simulate(&command, "--help"), Trial::Help));
/// assert!(matches!(simulate(&command, "--jobs=x"), Trial::Failed(_)));
/// ```
pub fn simulate(command: &Command, line: &str) -> Trial {
    let tokens = split_line(line);
    match parse_options(command, &tokens, false) {
        Ok(ParseOutcome::Options(options)) => Trial::Ready {
            handler: command.handler.clone(),
            options,
        },
        Ok(ParseOutcome::Help) => Trial::Help,
        Ok(ParseOutcome::Version) => Trial::Version,
        Err(err) => Trial::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::{StringOpt, Value};

    #[test]
    fn test_simulate_parses_quoted_values() {
        let command = Command::new("add").with_option(StringOpt::new("title"));
        match simulate(&command, r#"--title "hello world""#) {
            Trial::Ready { options, .. } => {
                assert_eq!(options.str("title"), Some("hello world"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_simulate_returns_errors_as_data() {
        let command = Command::new("add").with_option(StringOpt::new("title").required());
        match simulate(&command, "") {
            Trial::Failed(RunError::MissingRequired(missing)) => {
                assert_eq!(missing.len(), 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_simulate_keeps_undefined_keys() {
        let command = Command::new("add").with_option(StringOpt::new("title"));
        match simulate(&command, "") {
            Trial::Ready { options, .. } => {
                assert_eq!(options.get("title"), Some(&Value::Null));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_simulate_hands_back_no_handler_when_absent() {
        let command = Command::new("group");
        match simulate(&command, "") {
            Trial::Ready { handler, .. } => assert!(handler.is_none()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
