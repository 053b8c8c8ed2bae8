//! The execution pipeline.
//!
//! [`Runner`] owns a frozen [`CommandTree`] and an injected
//! [`EventHandler`], and drives one invocation end to end: global
//! help/version short-circuiting over the raw tokens, command resolution,
//! option parsing, then the user-supplied sequence before-hook → transform
//! → handler → after-hook, each awaited in turn.
//!
//! A `Runner` holds no per-invocation state; successive calls to
//! [`Runner::dispatch`] are independent.

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use cmdtree_core::{
    CommandDescription, CommandId, CommandTree, FLAG_PREFIX, HELP_FLAGS, HandlerResult,
    VERSION_FLAGS, Values,
};

use crate::error::RunError;
use crate::events::EventHandler;
use crate::options::{ParseOutcome, parse_options};
use crate::resolve::{remove_token, resolve};
use crate::scan::scan_candidates;

/// Pipeline-level hook run around every handled invocation, receiving the
/// resolved command's description.
pub type Hook = Arc<dyn Fn(CommandDescription) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Where one dispatch ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Global help was reported to the event handler.
    GlobalHelp,
    /// Help for one command was reported to the event handler.
    CommandHelp {
        /// Dotted path of the target command.
        path: String,
    },
    /// The version was reported to the event handler.
    Version,
    /// A handler ran to completion.
    Completed {
        /// Dotted path of the invoked command.
        path: String,
        /// The option map the handler received (post-transform).
        values: Values,
    },
}

enum BuiltIn {
    Help,
    Version,
}

/// Drives invocations against a frozen command tree.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cmdtree_core::{Command, CommandTree, NumberOpt};
/// use cmdtree_engine::{Outcome, Runner, SilentEvents};
///
/// # futures::executor::block_on(async {
/// let tree = CommandTree::build(vec![
///     Command::new("wait")
///         .with_option(NumberOpt::new("seconds").with_default(1.0))
///         .with_handler(|_| async { Ok(()) }),
/// ])
/// .unwrap();
///
/// let runner = Runner::new(tree, Arc::new(SilentEvents));
/// let tokens = vec!["wait".to_string(), "--seconds=5".to_string()];
/// match runner.dispatch(&tokens).await.unwrap() {
///     Outcome::Completed { path, values } => {
///         assert_eq!(path, "wait");
///         assert_eq!(values.number("seconds"), Some(5.0));
///     }
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// # });
/// ```
pub struct Runner {
    tree: CommandTree,
    events: Arc<dyn EventHandler>,
    before: Option<Hook>,
    after: Option<Hook>,
    omit_undefined: bool,
}

impl Runner {
    /// Creates a runner over `tree`, reporting presentation to `events`.
    pub fn new(tree: CommandTree, events: Arc<dyn EventHandler>) -> Self {
        Self {
            tree,
            events,
            before: None,
            after: None,
            omit_undefined: false,
        }
    }

    /// Runs `hook` before every handled invocation.
    pub fn with_before<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(CommandDescription) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.before = Some(Arc::new(move |command| Box::pin(hook(command))));
        self
    }

    /// Runs `hook` after every handled invocation.
    pub fn with_after<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(CommandDescription) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.after = Some(Arc::new(move |command| Box::pin(hook(command))));
        self
    }

    /// Leaves undefined option keys out of the handler's map.
    pub fn omit_undefined(mut self, omit: bool) -> Self {
        self.omit_undefined = omit;
        self
    }

    /// The frozen tree this runner dispatches against.
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Resolves and executes one invocation.
    ///
    /// Help/version requests and handler completion are `Ok` outcomes;
    /// resolution failures, parse rejections, and user-callback failures
    /// are returned as [`RunError`]s after any owed presentation event has
    /// fired.
    pub async fn dispatch(&self, tokens: &[String]) -> Result<Outcome, RunError> {
        if let Some((built_in, index)) = find_built_in_flag(tokens) {
            return Ok(match built_in {
                BuiltIn::Help => self.help_for_remaining(tokens, index),
                BuiltIn::Version => {
                    self.events.version();
                    Outcome::Version
                }
            });
        }

        let candidates = scan_candidates(tokens);
        let resolution = match resolve(&self.tree, &candidates, tokens) {
            Ok(resolution) => resolution,
            Err(err) => {
                self.events.global_help(&self.visible_roots());
                return Err(err);
            }
        };

        if resolution.help_requested {
            return Ok(self.emit_help(resolution.command));
        }

        let Some(id) = resolution.command else {
            self.events.global_help(&self.visible_roots());
            return Ok(Outcome::GlobalHelp);
        };

        let command = self.tree.command(id);
        let values = match parse_options(command, &resolution.tokens, self.omit_undefined)? {
            ParseOutcome::Help => return Ok(self.emit_help(Some(id))),
            ParseOutcome::Version => {
                self.events.version();
                return Ok(Outcome::Version);
            }
            ParseOutcome::Options(values) => values,
        };

        let Some(handler) = command.handler.clone() else {
            // nothing to invoke; the command only groups subcommands
            return Ok(self.emit_help(Some(id)));
        };

        let path = self.tree.path(id);
        debug!(%path, "invoking command");
        let description = self.tree.describe_command(id);

        if let Some(before) = &self.before {
            before(description.clone())
                .await
                .map_err(RunError::from_handler)?;
        }
        let values = match &command.transform {
            Some(transform) => transform(values).await.map_err(RunError::from_handler)?,
            None => values,
        };
        handler(values.clone())
            .await
            .map_err(RunError::from_handler)?;
        if let Some(after) = &self.after {
            after(description).await.map_err(RunError::from_handler)?;
        }

        Ok(Outcome::Completed { path, values })
    }

    /// [`dispatch`](Runner::dispatch) wrapped in the process-exit
    /// convention: success exits zero, any terminal error prints its
    /// message to stderr and exits one.
    pub async fn run(&self, tokens: &[String]) -> ExitCode {
        match self.dispatch(tokens).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        }
    }

    fn emit_help(&self, target: Option<CommandId>) -> Outcome {
        match target {
            Some(id) => {
                self.events.command_help(&self.tree.describe_command(id));
                Outcome::CommandHelp {
                    path: self.tree.path(id),
                }
            }
            None => {
                self.events.global_help(&self.visible_roots());
                Outcome::GlobalHelp
            }
        }
    }

    fn help_for_remaining(&self, tokens: &[String], flag_index: usize) -> Outcome {
        let remaining = remove_token(tokens, flag_index);
        let candidates = scan_candidates(&remaining);
        match resolve(&self.tree, &candidates, &remaining) {
            Ok(resolution) => self.emit_help(resolution.command),
            // a help request is never an error, whatever the rest says
            Err(_) => self.emit_help(None),
        }
    }

    fn visible_roots(&self) -> Vec<CommandDescription> {
        self.tree
            .roots()
            .iter()
            .filter(|id| !self.tree.command(**id).hidden)
            .map(|id| self.tree.describe_command(*id))
            .collect()
    }
}

/// Finds the first bare help/version flag that is not positioned as the
/// value of a preceding flag.
fn find_built_in_flag(tokens: &[String]) -> Option<(BuiltIn, usize)> {
    for (index, token) in tokens.iter().enumerate() {
        let built_in = if HELP_FLAGS.contains(&token.as_str()) {
            BuiltIn::Help
        } else if VERSION_FLAGS.contains(&token.as_str()) {
            BuiltIn::Version
        } else {
            continue;
        };
        if index > 0 {
            let previous = &tokens[index - 1];
            if previous.starts_with(FLAG_PREFIX) && !previous.contains('=') {
                // presumed to be the previous flag's value
                continue;
            }
        }
        return Some((built_in, index));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_built_in_flag_found_bare() {
        assert!(matches!(
            find_built_in_flag(&tokens(&["push", "--help"])),
            Some((BuiltIn::Help, 1))
        ));
        assert!(matches!(
            find_built_in_flag(&tokens(&["-v"])),
            Some((BuiltIn::Version, 0))
        ));
    }

    #[test]
    fn test_built_in_flag_skipped_as_flag_value() {
        // -h sits where --filter's value would go
        assert!(find_built_in_flag(&tokens(&["push", "--filter", "-h"])).is_none());
        // but an embedded-value flag cannot consume it
        assert!(matches!(
            find_built_in_flag(&tokens(&["push", "--filter=x", "-h"])),
            Some((BuiltIn::Help, 2))
        ));
    }

    #[test]
    fn test_later_qualifying_occurrence_still_found() {
        // the first --help is swallowed as --filter's value; the second is
        // preceded by a bare token and qualifies
        assert!(matches!(
            find_built_in_flag(&tokens(&["--filter", "--help", "push", "--help"])),
            Some((BuiltIn::Help, 3))
        ));
    }
}
