//! Recursive command resolution.
//!
//! Resolution maps the leading run of candidates onto a position in the
//! command tree, removing each consumed command-path token from the stream
//! as it descends. Candidate indices always refer to the *current* reduced
//! token list; [`remove_token`] and the index re-basing in
//! [`shift_candidates`] are the only places that arithmetic happens.

use cmdtree_core::{CommandId, CommandTree};
use tracing::debug;

use crate::error::RunError;
use crate::scan::Candidate;

/// The literal that turns an invocation into a help request for its target.
const HELP_LITERAL: &str = "help";

/// Outcome of command resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The resolved command, or `None` for global scope.
    pub command: Option<CommandId>,
    /// The token stream with consumed command-path tokens removed.
    pub tokens: Vec<String>,
    /// Set when a leading `help` literal asked for help on the target
    /// instead of invoking it.
    pub help_requested: bool,
}

/// Returns `tokens` without the element at `index`, order preserved.
pub(crate) fn remove_token(tokens: &[String], index: usize) -> Vec<String> {
    let mut reduced = Vec::with_capacity(tokens.len().saturating_sub(1));
    for (position, token) in tokens.iter().enumerate() {
        if position != index {
            reduced.push(token.clone());
        }
    }
    reduced
}

/// Re-bases candidate indices after the token at `removed` was dropped.
fn shift_candidates(candidates: &[Candidate], removed: usize) -> Vec<Candidate> {
    candidates
        .iter()
        .map(|candidate| Candidate {
            text: candidate.text.clone(),
            index: if candidate.index > removed {
                candidate.index - 1
            } else {
                candidate.index
            },
        })
        .collect()
}

/// Resolves `candidates` against the tree, consuming matched command-path
/// tokens out of `tokens`.
///
/// Matching is exact and case-sensitive against each command's name and
/// aliases. With no candidates at all the result is global scope. A leading
/// `help` literal is never matched against the tree; it marks the result as
/// a help request for whatever the remaining candidates resolve to (or for
/// global scope when they resolve to nothing).
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Command, CommandTree};
/// use cmdtree_engine::{resolve, scan_candidates};
///
/// let tree = CommandTree::build(vec![
///     Command::new("db").with_subcommand(Command::new("migrate")),
/// ])
/// .unwrap();
///
/// let tokens: Vec<String> = ["db", "migrate", "--dry-run"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// let resolution = resolve(&tree, &scan_candidates(&tokens), &tokens).unwrap();
///
/// let migrate = resolution.command.unwrap();
/// assert_eq!(tree.path(migrate), "db.migrate");
/// assert_eq!(resolution.tokens, ["--dry-run"]);
/// ```
pub fn resolve(
    tree: &CommandTree,
    candidates: &[Candidate],
    tokens: &[String],
) -> Result<Resolution, RunError> {
    resolve_in(tree, None, candidates.to_vec(), tokens.to_vec(), false)
}

fn resolve_in(
    tree: &CommandTree,
    scope: Option<CommandId>,
    mut candidates: Vec<Candidate>,
    mut tokens: Vec<String>,
    mut help: bool,
) -> Result<Resolution, RunError> {
    while candidates
        .first()
        .is_some_and(|candidate| candidate.text == HELP_LITERAL)
    {
        help = true;
        let literal = candidates.remove(0);
        tokens = remove_token(&tokens, literal.index);
        candidates = shift_candidates(&candidates, literal.index);
    }

    let Some(first) = candidates.first().cloned() else {
        return Ok(Resolution {
            command: scope,
            tokens,
            help_requested: help,
        });
    };

    let Some(matched) = tree.find_in(scope, &first.text) else {
        if help {
            // help requests never fail resolution; an unknown target
            // degrades to global scope
            return Ok(Resolution {
                command: None,
                tokens,
                help_requested: true,
            });
        }
        return Err(match scope {
            None => RunError::UnknownCommand(first.text),
            Some(parent) => RunError::UnknownSubcommand {
                path: tree.path(parent),
                name: first.text,
            },
        });
    };

    debug!(path = %tree.path(matched), token = %first.text, "matched command segment");
    tokens = remove_token(&tokens, first.index);
    let rest = shift_candidates(&candidates[1..], first.index);

    if rest.is_empty() || tree.is_leaf(matched) {
        return Ok(Resolution {
            command: Some(matched),
            tokens,
            help_requested: help,
        });
    }

    resolve_in(tree, Some(matched), rest, tokens, help)
}
