//! Per-command option parsing.
//!
//! Given a resolved command and its remaining tokens, the parser classifies
//! each token as a positional value or a named flag, coerces it to the
//! declared kind, and builds the typed option map. Help/version flags
//! abandon the parse immediately with a sentinel; the two aggregate errors
//! (missing-required, unrecognized) are collected over the whole scan and
//! raised once at the end, missing-required first.

use std::collections::{HashMap, VecDeque};

use cmdtree_core::{
    Command, FLAG_PREFIX, HELP_FLAGS, OptionSpec, VERSION_FLAGS, Value, Values,
    parse_bool_literal,
};
use tracing::{debug, trace};

use crate::error::{MissingOption, RunError};

/// Result of an option parse: the typed map, or a short-circuit sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Every token classified and coerced; defaults applied.
    Options(Values),
    /// A help flag abandoned the parse.
    Help,
    /// A version flag abandoned the parse.
    Version,
}

/// Parses `tokens` against `command`'s option specs.
///
/// With `omit_undefined` set, keys that end the parse undefined (no input,
/// no default) are left out of the map; otherwise they appear with
/// [`Value::Null`].
///
/// # Examples
///
/// ```
/// use cmdtree_core::{BooleanOpt, Command, NumberOpt, PositionalOpt};
/// use cmdtree_engine::{ParseOutcome, parse_options};
///
/// let command = Command::new("migrate")
///     .with_option(PositionalOpt::new("target"))
///     .with_option(NumberOpt::new("steps").integer_only())
///     .with_option(BooleanOpt::new("dry-run"));
///
/// let tokens: Vec<String> = ["prod", "--steps=3", "--dry-run"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
///
/// let ParseOutcome::Options(values) = parse_options(&command, &tokens, false).unwrap() else {
///     panic!("expected options");
/// };
/// assert_eq!(values.str("target"), Some("prod"));
/// assert_eq!(values.number("steps"), Some(3.0));
/// assert_eq!(values.bool("dry-run"), Some(true));
/// ```
pub fn parse_options(
    command: &Command,
    tokens: &[String],
    omit_undefined: bool,
) -> Result<ParseOutcome, RunError> {
    let mut positionals: VecDeque<&OptionSpec> = command.positional_options().collect();
    let mut named: HashMap<String, &OptionSpec> = HashMap::new();
    for spec in command.named_options() {
        if let Some(flag) = spec.canonical_name() {
            named.insert(flag, spec);
        }
        for alias in spec.canonical_aliases() {
            named.insert(alias, spec);
        }
    }

    let mut captured: HashMap<String, Value> = HashMap::new();
    let mut unrecognized: Vec<String> = Vec::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        let token = tokens[cursor].as_str();

        if HELP_FLAGS.contains(&token) {
            return Ok(ParseOutcome::Help);
        }
        if VERSION_FLAGS.contains(&token) {
            return Ok(ParseOutcome::Version);
        }

        if !token.starts_with(FLAG_PREFIX) {
            match positionals.pop_front() {
                Some(spec) => {
                    check_choices(spec, &spec.display_name(), token)?;
                    captured.insert(spec.key().to_string(), Value::String(token.to_string()));
                }
                None => {
                    trace!(token, "no positional slot left, dropping token");
                }
            }
            cursor += 1;
            continue;
        }

        let (flag, embedded) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };

        let Some(spec) = named.get(flag).copied() else {
            if !unrecognized.iter().any(|seen| seen == flag) {
                unrecognized.push(flag.to_string());
            }
            cursor += 1;
            continue;
        };

        let lookahead = tokens.get(cursor + 1).map(String::as_str);
        let mut consumed_lookahead = false;

        let value = match spec {
            OptionSpec::Boolean(_) => match embedded {
                Some(raw) => match parse_bool_literal(raw) {
                    Some(flagged) => Value::Bool(flagged),
                    None => {
                        return Err(RunError::InvalidBooleanValue {
                            flag: flag.to_string(),
                            value: raw.to_string(),
                        });
                    }
                },
                None => match lookahead {
                    Some(next) if !next.starts_with(FLAG_PREFIX) => {
                        match parse_bool_literal(next) {
                            Some(flagged) => {
                                consumed_lookahead = true;
                                Value::Bool(flagged)
                            }
                            // presence alone means true; the token stays
                            None => Value::Bool(true),
                        }
                    }
                    _ => Value::Bool(true),
                },
            },
            OptionSpec::String(_) => {
                let raw = match embedded {
                    Some(value) => value,
                    None => match lookahead {
                        Some(next) => {
                            consumed_lookahead = true;
                            next
                        }
                        None => {
                            return Err(RunError::MissingStringValue {
                                flag: flag.to_string(),
                            });
                        }
                    },
                };
                check_choices(spec, flag, raw)?;
                Value::String(raw.to_string())
            }
            OptionSpec::Number(opt) => {
                let raw = match embedded {
                    Some(value) => value,
                    None => match lookahead {
                        Some(next) => {
                            consumed_lookahead = true;
                            next
                        }
                        None => {
                            return Err(RunError::MissingNumberValue {
                                flag: flag.to_string(),
                            });
                        }
                    },
                };
                let parsed: f64 = raw.parse().map_err(|_| RunError::NumberNotNumeric {
                    flag: flag.to_string(),
                    value: raw.to_string(),
                })?;
                if opt.integer && parsed.fract() != 0.0 {
                    return Err(RunError::NotAnInteger {
                        flag: flag.to_string(),
                        value: parsed,
                    });
                }
                if let Some(min) = opt.min {
                    if parsed < min {
                        return Err(RunError::BelowMinimum {
                            flag: flag.to_string(),
                            min,
                            value: parsed,
                        });
                    }
                }
                if let Some(max) = opt.max {
                    if parsed > max {
                        return Err(RunError::AboveMaximum {
                            flag: flag.to_string(),
                            max,
                            value: parsed,
                        });
                    }
                }
                Value::Number(parsed)
            }
            OptionSpec::Positional(_) => {
                cursor += 1;
                continue;
            }
        };

        trace!(flag, key = spec.key(), "captured named option");
        captured.insert(spec.key().to_string(), value);
        cursor += if consumed_lookahead { 2 } else { 1 };
    }

    let mut values = Values::new();
    let mut missing: Vec<MissingOption> = Vec::new();
    for spec in &command.options {
        let key = spec.key();
        match captured.remove(key) {
            Some(value) => values.insert(key, value),
            None => match spec.default_value() {
                Some(default) => values.insert(key, default),
                None => {
                    if spec.required() {
                        missing.push(MissingOption {
                            name: spec.display_name(),
                            aliases: spec.canonical_aliases(),
                        });
                    }
                    if !omit_undefined {
                        values.insert(key, Value::Null);
                    }
                }
            },
        }
    }

    if !missing.is_empty() {
        debug!(count = missing.len(), "required options missing");
        return Err(RunError::MissingRequired(missing));
    }
    if !unrecognized.is_empty() {
        debug!(count = unrecognized.len(), "unrecognized options");
        return Err(RunError::UnrecognizedOptions(unrecognized));
    }

    Ok(ParseOutcome::Options(values))
}

fn check_choices(spec: &OptionSpec, flag: &str, raw: &str) -> Result<(), RunError> {
    if let Some(allowed) = spec.choices() {
        if !allowed.iter().any(|choice| choice == raw) {
            return Err(RunError::ChoiceViolation {
                flag: flag.to_string(),
                value: raw.to_string(),
                allowed: allowed.to_vec(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::{BooleanOpt, NumberOpt, PositionalOpt, StringOpt};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn values(command: &Command, raw: &[&str]) -> Values {
        match parse_options(command, &tokens(raw), false).unwrap() {
            ParseOutcome::Options(values) => values,
            other => panic!("expected options, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_spellings() {
        let command = Command::new("run").with_option(BooleanOpt::new("force"));

        assert_eq!(values(&command, &["--force"]).bool("force"), Some(true));
        assert_eq!(
            values(&command, &["--force=true"]).bool("force"),
            Some(true)
        );
        assert_eq!(values(&command, &["--force=1"]).bool("force"), Some(true));
        assert_eq!(
            values(&command, &["--force=false"]).bool("force"),
            Some(false)
        );
        assert_eq!(values(&command, &["--force=0"]).bool("force"), Some(false));
        assert_eq!(
            values(&command, &["--force", "FALSE"]).bool("force"),
            Some(false)
        );

        let err = parse_options(&command, &tokens(&["--force=maybe"]), false).unwrap_err();
        assert_eq!(
            err,
            RunError::InvalidBooleanValue {
                flag: "--force".to_string(),
                value: "maybe".to_string(),
            }
        );
    }

    #[test]
    fn test_boolean_does_not_consume_non_literal_lookahead() {
        let command = Command::new("run")
            .with_option(BooleanOpt::new("force"))
            .with_option(PositionalOpt::new("target"));

        let parsed = values(&command, &["--force", "prod"]);
        assert_eq!(parsed.bool("force"), Some(true));
        assert_eq!(parsed.str("target"), Some("prod"));
    }

    #[test]
    fn test_boolean_consumes_literal_lookahead() {
        // the ambiguous side of the lookahead rule: a literal that was
        // meant as a positional is taken as the flag's value
        let command = Command::new("run")
            .with_option(BooleanOpt::new("force"))
            .with_option(PositionalOpt::new("target"));

        let parsed = values(&command, &["--force", "0", "prod"]);
        assert_eq!(parsed.bool("force"), Some(false));
        assert_eq!(parsed.str("target"), Some("prod"));
    }

    #[test]
    fn test_string_requires_a_value() {
        let command = Command::new("run").with_option(StringOpt::new("remote").with_alias("r"));

        assert_eq!(
            values(&command, &["--remote=origin"]).str("remote"),
            Some("origin")
        );
        assert_eq!(
            values(&command, &["-r", "origin"]).str("remote"),
            Some("origin")
        );
        assert_eq!(
            parse_options(&command, &tokens(&["--remote"]), false).unwrap_err(),
            RunError::MissingStringValue {
                flag: "--remote".to_string(),
            }
        );
    }

    #[test]
    fn test_string_value_may_look_like_a_flag() {
        let command = Command::new("run").with_option(StringOpt::new("pattern"));
        assert_eq!(
            values(&command, &["--pattern", "--weird"]).str("pattern"),
            Some("--weird")
        );
    }

    #[test]
    fn test_choice_violation_on_named_option() {
        let command = Command::new("run")
            .with_option(StringOpt::new("mode").with_choices(["a", "b"]));

        let err = parse_options(&command, &tokens(&["--mode=c"]), false).unwrap_err();
        assert_eq!(
            err,
            RunError::ChoiceViolation {
                flag: "--mode".to_string(),
                value: "c".to_string(),
                allowed: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_number_coercion_and_bounds() {
        let command = Command::new("run")
            .with_option(NumberOpt::new("count").with_min(1.0).with_max(10.0));

        assert_eq!(values(&command, &["--count=5"]).number("count"), Some(5.0));
        assert_eq!(
            values(&command, &["--count", "2.5"]).number("count"),
            Some(2.5)
        );
        assert_eq!(
            parse_options(&command, &tokens(&["--count=15"]), false).unwrap_err(),
            RunError::AboveMaximum {
                flag: "--count".to_string(),
                max: 10.0,
                value: 15.0,
            }
        );
        assert_eq!(
            parse_options(&command, &tokens(&["--count=0"]), false).unwrap_err(),
            RunError::BelowMinimum {
                flag: "--count".to_string(),
                min: 1.0,
                value: 0.0,
            }
        );
        assert_eq!(
            parse_options(&command, &tokens(&["--count=abc"]), false).unwrap_err(),
            RunError::NumberNotNumeric {
                flag: "--count".to_string(),
                value: "abc".to_string(),
            }
        );
        assert_eq!(
            parse_options(&command, &tokens(&["--count"]), false).unwrap_err(),
            RunError::MissingNumberValue {
                flag: "--count".to_string(),
            }
        );
    }

    #[test]
    fn test_integer_only_rejects_fractions() {
        let command = Command::new("run").with_option(NumberOpt::new("jobs").integer_only());
        assert_eq!(
            parse_options(&command, &tokens(&["--jobs=1.5"]), false).unwrap_err(),
            RunError::NotAnInteger {
                flag: "--jobs".to_string(),
                value: 1.5,
            }
        );
        assert_eq!(values(&command, &["--jobs=8"]).number("jobs"), Some(8.0));
    }

    #[test]
    fn test_positionals_fill_in_declaration_order() {
        let command = Command::new("copy")
            .with_option(PositionalOpt::new("source"))
            .with_option(PositionalOpt::new("dest"));

        let parsed = values(&command, &["a.txt", "b.txt", "surplus"]);
        assert_eq!(parsed.str("source"), Some("a.txt"));
        assert_eq!(parsed.str("dest"), Some("b.txt"));
        // surplus dropped without error
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_positional_choice_violation() {
        let command = Command::new("run")
            .with_option(PositionalOpt::new("env").with_choices(["dev", "prod"]));
        let err = parse_options(&command, &tokens(&["staging"]), false).unwrap_err();
        assert_eq!(
            err,
            RunError::ChoiceViolation {
                flag: "env".to_string(),
                value: "staging".to_string(),
                allowed: vec!["dev".to_string(), "prod".to_string()],
            }
        );
    }

    #[test]
    fn test_help_and_version_sentinels_short_circuit() {
        let command = Command::new("run").with_option(StringOpt::new("mode").required());

        // required violations are moot once the sentinel wins
        assert_eq!(
            parse_options(&command, &tokens(&["--help"]), false).unwrap(),
            ParseOutcome::Help
        );
        assert_eq!(
            parse_options(&command, &tokens(&["-v"]), false).unwrap(),
            ParseOutcome::Version
        );
    }

    #[test]
    fn test_defaults_and_omit_undefined() {
        let command = Command::new("run")
            .with_option(StringOpt::new("mode").with_default("safe"))
            .with_option(BooleanOpt::new("force"));

        let kept = values(&command, &[]);
        assert_eq!(kept.str("mode"), Some("safe"));
        assert!(kept.get("force").unwrap().is_null());

        let omitted = match parse_options(&command, &[], true).unwrap() {
            ParseOutcome::Options(values) => values,
            other => panic!("expected options, got {other:?}"),
        };
        assert_eq!(omitted.str("mode"), Some("safe"));
        assert!(!omitted.contains("force"));
    }

    #[test]
    fn test_missing_required_aggregates_in_declaration_order() {
        let command = Command::new("run")
            .with_option(StringOpt::new("remote").with_alias("r").required())
            .with_option(NumberOpt::new("count").required())
            .with_option(PositionalOpt::new("target").required());

        let err = parse_options(&command, &[], false).unwrap_err();
        let RunError::MissingRequired(missing) = err else {
            panic!("expected MissingRequired, got {err:?}");
        };
        let names: Vec<&str> = missing.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["--remote", "--count", "target"]);
        assert_eq!(missing[0].aliases, vec!["-r".to_string()]);
    }

    #[test]
    fn test_missing_required_supersedes_unrecognized() {
        let command = Command::new("run").with_option(StringOpt::new("remote").required());
        let err = parse_options(&command, &tokens(&["--nope"]), false).unwrap_err();
        assert!(matches!(err, RunError::MissingRequired(_)), "{err:?}");
    }

    #[test]
    fn test_unrecognized_aggregates_and_keeps_lookahead() {
        let command = Command::new("run")
            .with_option(PositionalOpt::new("target"));

        let err =
            parse_options(&command, &tokens(&["--nope", "prod", "--also-nope=1"]), false)
                .unwrap_err();
        assert_eq!(
            err,
            RunError::UnrecognizedOptions(vec![
                "--nope".to_string(),
                "--also-nope".to_string(),
            ])
        );
    }

    #[test]
    fn test_unrecognized_flag_does_not_consume_next_token() {
        // if --nope swallowed "prod", the required positional would go
        // unfilled and MissingRequired would supersede
        let command = Command::new("run").with_option(PositionalOpt::new("target").required());

        let err = parse_options(&command, &tokens(&["--nope", "prod"]), false).unwrap_err();
        assert_eq!(
            err,
            RunError::UnrecognizedOptions(vec!["--nope".to_string()])
        );
    }

    #[test]
    fn test_repeated_flag_last_occurrence_wins() {
        let command = Command::new("run").with_option(StringOpt::new("mode"));
        let parsed = values(&command, &["--mode=a", "--mode=b"]);
        assert_eq!(parsed.str("mode"), Some("b"));
    }
}
