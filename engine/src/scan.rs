//! Candidate scanning over the raw token stream.
//!
//! Before any command is resolved, the scanner walks the tokens once and
//! extracts the subsequence that could name a command-path segment, each
//! tagged with its position in the stream.
//!
//! The scan runs before option arity is known (the command, and therefore
//! its option kinds, is still unresolved), so flag/value pairing is a
//! heuristic: a flag without an embedded `=` value is assumed to consume the
//! next token, and a boolean flag followed by a bare literal can therefore
//! shadow a token that was really a command segment. The option parser is
//! the authority on arity; the scanner only has to keep command-path tokens
//! out of its way.

use cmdtree_core::{FLAG_PREFIX, HELP_FLAGS, VERSION_FLAGS, parse_bool_literal};
use tracing::trace;

/// A token provisionally treated as part of the command path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The token text.
    pub text: String,
    /// Position in the token stream the candidate was taken from.
    pub index: usize,
}

/// Extracts command-path candidates from `tokens`, in input order.
///
/// # Examples
///
/// ```
/// use cmdtree_engine::scan_candidates;
///
/// let tokens: Vec<String> = ["db", "migrate", "--steps", "3", "--dry-run=true"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
///
/// let candidates = scan_candidates(&tokens);
/// let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(texts, ["db", "migrate"]);
/// assert_eq!(candidates[1].index, 1);
/// ```
pub fn scan_candidates(tokens: &[String]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        let token = tokens[cursor].as_str();

        if HELP_FLAGS.contains(&token) || VERSION_FLAGS.contains(&token) {
            // built-in flags never name a command; a trailing boolean
            // literal is presumed to be their value
            let step = match tokens.get(cursor + 1) {
                Some(next) if parse_bool_literal(next).is_some() => 2,
                _ => 1,
            };
            cursor += step;
        } else if token.starts_with(FLAG_PREFIX) {
            // no embedded value: the next token is presumed consumed
            cursor += if token.contains('=') { 1 } else { 2 };
        } else {
            trace!(token, index = cursor, "command-path candidate");
            candidates.push(Candidate {
                text: token.to_string(),
                index: cursor,
            });
            cursor += 1;
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn texts(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_bare_tokens_become_candidates_with_indices() {
        let candidates = scan_candidates(&tokens(&["db", "migrate"]));
        assert_eq!(
            candidates,
            vec![
                Candidate {
                    text: "db".to_string(),
                    index: 0,
                },
                Candidate {
                    text: "migrate".to_string(),
                    index: 1,
                },
            ]
        );
    }

    #[test]
    fn test_flag_without_equals_swallows_next_token() {
        let candidates = scan_candidates(&tokens(&["push", "--remote", "origin", "main"]));
        assert_eq!(texts(&candidates), ["push", "main"]);
        assert_eq!(candidates[1].index, 3);
    }

    #[test]
    fn test_flag_with_equals_swallows_only_itself() {
        let candidates = scan_candidates(&tokens(&["push", "--remote=origin", "main"]));
        assert_eq!(texts(&candidates), ["push", "main"]);
        assert_eq!(candidates[1].index, 2);
    }

    #[test]
    fn test_help_flag_skips_boolean_literal_only() {
        let candidates = scan_candidates(&tokens(&["--help", "true", "db"]));
        assert_eq!(texts(&candidates), ["db"]);

        let candidates = scan_candidates(&tokens(&["-h", "db"]));
        assert_eq!(texts(&candidates), ["db"]);

        let candidates = scan_candidates(&tokens(&["--version", "0", "db"]));
        assert_eq!(texts(&candidates), ["db"]);
    }

    #[test]
    fn test_arity_heuristic_can_shadow_a_real_candidate() {
        // --verbose may well be boolean, but the scanner cannot know yet:
        // "db" is presumed to be its value and never becomes a candidate.
        let candidates = scan_candidates(&tokens(&["--verbose", "db"]));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_empty_stream_scans_to_nothing() {
        assert!(scan_candidates(&[]).is_empty());
    }
}
