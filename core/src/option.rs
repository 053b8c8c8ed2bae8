//! Option declarations.
//!
//! Options are a closed set of tagged variants, one per kind: string, number,
//! boolean, and positional. Each variant carries only the fields meaningful
//! to its kind, and each has pure-constructor builders producing immutable
//! values that the tree validator consumes.
//!
//! Named options are matched by their canonical flag form: a declared name
//! that already starts with `-` is kept verbatim, a single character becomes
//! a short flag (`v` → `-v`), anything longer becomes a long flag
//! (`verbose` → `--verbose`). The same rule applies to aliases.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Tokens reserved for the built-in help flag.
pub const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

/// Tokens reserved for the built-in version flag.
pub const VERSION_FLAGS: [&str; 2] = ["--version", "-v"];

/// Leading character that marks a token as a named flag.
pub const FLAG_PREFIX: char = '-';

/// Normalizes a declared option name into its `-x`/`--name` flag spelling.
///
/// # Examples
///
/// ```
/// use cmdtree_core::canonical_flag;
///
/// assert_eq!(canonical_flag("v"), "-v");
/// assert_eq!(canonical_flag("verbose"), "--verbose");
/// assert_eq!(canonical_flag("--already"), "--already");
/// ```
pub fn canonical_flag(name: &str) -> String {
    if name.starts_with(FLAG_PREFIX) {
        name.to_string()
    } else if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// A named option taking a string value.
///
/// # Examples
///
/// ```
/// use cmdtree_core::StringOpt;
///
/// let mode = StringOpt::new("mode")
///     .with_alias("m")
///     .with_choices(["fast", "safe"])
///     .required();
/// assert_eq!(mode.key, "mode");
/// assert!(mode.required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringOpt {
    /// Declaration-site identifier; the key in the parsed option map.
    pub key: String,
    /// Declared name the canonical flag is generated from.
    pub name: String,
    /// Alternative flag spellings.
    pub aliases: Vec<String>,
    /// Whether the option must end up defined after defaulting.
    pub required: bool,
    /// Value substituted when the option is absent.
    pub default: Option<String>,
    /// Closed set of allowed values.
    pub choices: Option<Vec<String>>,
}

impl StringOpt {
    /// Creates a string option whose name defaults to its key.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            aliases: Vec::new(),
            required: false,
            default: None,
            choices: None,
        }
    }

    /// Overrides the declared flag name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Adds an alias spelling.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the option required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Restricts the value to a closed set of choices.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }
}

/// A named option taking a numeric value.
///
/// # Examples
///
/// ```
/// use cmdtree_core::NumberOpt;
///
/// let jobs = NumberOpt::new("jobs")
///     .integer_only()
///     .with_min(1.0)
///     .with_max(64.0)
///     .with_default(4.0);
/// assert!(jobs.integer);
/// assert_eq!(jobs.default, Some(4.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberOpt {
    /// Declaration-site identifier; the key in the parsed option map.
    pub key: String,
    /// Declared name the canonical flag is generated from.
    pub name: String,
    /// Alternative flag spellings.
    pub aliases: Vec<String>,
    /// Whether the option must end up defined after defaulting.
    pub required: bool,
    /// Value substituted when the option is absent.
    pub default: Option<f64>,
    /// Rejects non-integral values when set.
    pub integer: bool,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

impl NumberOpt {
    /// Creates a number option whose name defaults to its key.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            aliases: Vec::new(),
            required: false,
            default: None,
            integer: false,
            min: None,
            max: None,
        }
    }

    /// Overrides the declared flag name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Adds an alias spelling.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the option required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    /// Rejects non-integral values.
    pub fn integer_only(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Sets the inclusive lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// A named boolean flag.
///
/// Presence alone means `true`; an explicit value may be embedded
/// (`--force=false`) or follow as a literal (`--force 0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanOpt {
    /// Declaration-site identifier; the key in the parsed option map.
    pub key: String,
    /// Declared name the canonical flag is generated from.
    pub name: String,
    /// Alternative flag spellings.
    pub aliases: Vec<String>,
    /// Whether the option must end up defined after defaulting.
    pub required: bool,
    /// Value substituted when the option is absent.
    pub default: Option<bool>,
}

impl BooleanOpt {
    /// Creates a boolean option whose name defaults to its key.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            aliases: Vec::new(),
            required: false,
            default: None,
        }
    }

    /// Overrides the declared flag name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Adds an alias spelling.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the option required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: bool) -> Self {
        self.default = Some(value);
        self
    }
}

/// An option whose value is supplied by bare position rather than by name.
///
/// Positionals are filled in declaration order; surplus bare tokens with no
/// remaining positional slot are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalOpt {
    /// Declaration-site identifier; the key in the parsed option map.
    pub key: String,
    /// Whether the option must end up defined after defaulting.
    pub required: bool,
    /// Value substituted when the option is absent.
    pub default: Option<String>,
    /// Closed set of allowed values.
    pub choices: Option<Vec<String>>,
}

impl PositionalOpt {
    /// Creates a positional option.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            required: false,
            default: None,
            choices: None,
        }
    }

    /// Marks the option required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Restricts the value to a closed set of choices.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }
}

/// An option declaration of any kind.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{NumberOpt, OptionSpec, StringOpt};
///
/// let spec = OptionSpec::from(StringOpt::new("mode").with_alias("m"));
/// assert_eq!(spec.canonical_name().as_deref(), Some("--mode"));
/// assert!(spec.matches("-m"));
/// assert!(!spec.matches("--other"));
///
/// let count = OptionSpec::from(NumberOpt::new("n"));
/// assert_eq!(count.canonical_name().as_deref(), Some("-n"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionSpec {
    /// String-valued named option.
    String(StringOpt),
    /// Number-valued named option.
    Number(NumberOpt),
    /// Boolean flag.
    Boolean(BooleanOpt),
    /// Positional value slot.
    Positional(PositionalOpt),
}

impl OptionSpec {
    /// The declaration key, used as the parsed-map key.
    pub fn key(&self) -> &str {
        match self {
            OptionSpec::String(o) => &o.key,
            OptionSpec::Number(o) => &o.key,
            OptionSpec::Boolean(o) => &o.key,
            OptionSpec::Positional(o) => &o.key,
        }
    }

    /// Whether the option must end up defined after defaulting.
    pub fn required(&self) -> bool {
        match self {
            OptionSpec::String(o) => o.required,
            OptionSpec::Number(o) => o.required,
            OptionSpec::Boolean(o) => o.required,
            OptionSpec::Positional(o) => o.required,
        }
    }

    /// Returns `true` for positional slots.
    pub fn is_positional(&self) -> bool {
        matches!(self, OptionSpec::Positional(_))
    }

    /// The canonical `-x`/`--name` spelling; `None` for positionals.
    pub fn canonical_name(&self) -> Option<String> {
        match self {
            OptionSpec::String(o) => Some(canonical_flag(&o.name)),
            OptionSpec::Number(o) => Some(canonical_flag(&o.name)),
            OptionSpec::Boolean(o) => Some(canonical_flag(&o.name)),
            OptionSpec::Positional(_) => None,
        }
    }

    /// Canonical spellings of every alias; empty for positionals.
    pub fn canonical_aliases(&self) -> Vec<String> {
        let aliases = match self {
            OptionSpec::String(o) => &o.aliases,
            OptionSpec::Number(o) => &o.aliases,
            OptionSpec::Boolean(o) => &o.aliases,
            OptionSpec::Positional(_) => return Vec::new(),
        };
        aliases.iter().map(|a| canonical_flag(a)).collect()
    }

    /// Raw declared name and aliases, for validation; `None` for positionals.
    pub fn declared_labels(&self) -> Option<(&str, &[String])> {
        match self {
            OptionSpec::String(o) => Some((&o.name, &o.aliases)),
            OptionSpec::Number(o) => Some((&o.name, &o.aliases)),
            OptionSpec::Boolean(o) => Some((&o.name, &o.aliases)),
            OptionSpec::Positional(_) => None,
        }
    }

    /// The allowed-value set, where the kind supports one.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            OptionSpec::String(o) => o.choices.as_deref(),
            OptionSpec::Positional(o) => o.choices.as_deref(),
            _ => None,
        }
    }

    /// The declared default, coerced to a [`Value`].
    pub fn default_value(&self) -> Option<Value> {
        match self {
            OptionSpec::String(o) => o.default.clone().map(Value::String),
            OptionSpec::Number(o) => o.default.map(Value::Number),
            OptionSpec::Boolean(o) => o.default.map(Value::Bool),
            OptionSpec::Positional(o) => o.default.clone().map(Value::String),
        }
    }

    /// Checks a flag token against the canonical name and aliases.
    pub fn matches(&self, flag: &str) -> bool {
        self.canonical_name().as_deref() == Some(flag)
            || self.canonical_aliases().iter().any(|a| a == flag)
    }

    /// Name used in error messages: the canonical flag, or the key for
    /// positionals.
    pub fn display_name(&self) -> String {
        self.canonical_name()
            .unwrap_or_else(|| self.key().to_string())
    }
}

impl From<StringOpt> for OptionSpec {
    fn from(opt: StringOpt) -> Self {
        OptionSpec::String(opt)
    }
}

impl From<NumberOpt> for OptionSpec {
    fn from(opt: NumberOpt) -> Self {
        OptionSpec::Number(opt)
    }
}

impl From<BooleanOpt> for OptionSpec {
    fn from(opt: BooleanOpt) -> Self {
        OptionSpec::Boolean(opt)
    }
}

impl From<PositionalOpt> for OptionSpec {
    fn from(opt: PositionalOpt) -> Self {
        OptionSpec::Positional(opt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_flag_generation() {
        assert_eq!(canonical_flag("f"), "-f");
        assert_eq!(canonical_flag("force"), "--force");
        assert_eq!(canonical_flag("-f"), "-f");
        assert_eq!(canonical_flag("--force"), "--force");
    }

    #[test]
    fn test_spec_matches_name_and_aliases() {
        let spec = OptionSpec::from(BooleanOpt::new("force").with_alias("f"));
        assert!(spec.matches("--force"));
        assert!(spec.matches("-f"));
        assert!(!spec.matches("--f"));
    }

    #[test]
    fn test_positional_has_no_flag_forms() {
        let spec = OptionSpec::from(PositionalOpt::new("target"));
        assert_eq!(spec.canonical_name(), None);
        assert!(spec.canonical_aliases().is_empty());
        assert_eq!(spec.display_name(), "target");
    }

    #[test]
    fn test_default_values_coerce_per_kind() {
        let string = OptionSpec::from(StringOpt::new("mode").with_default("safe"));
        let number = OptionSpec::from(NumberOpt::new("n").with_default(2.0));
        let boolean = OptionSpec::from(BooleanOpt::new("force").with_default(false));

        assert_eq!(string.default_value(), Some(Value::String("safe".into())));
        assert_eq!(number.default_value(), Some(Value::Number(2.0)));
        assert_eq!(boolean.default_value(), Some(Value::Bool(false)));
    }

    #[test]
    fn test_spec_serializes_with_kind_tag() {
        let spec = OptionSpec::from(NumberOpt::new("jobs").integer_only());
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "number");
        assert_eq!(json["integer"], true);
    }
}
