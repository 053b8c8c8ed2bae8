//! Coerced option values.
//!
//! The option parser turns raw tokens into [`Value`]s and collects them into
//! a [`Values`] map keyed by each option's declaration key. Both types are
//! serializable so parsed invocations can round-trip through JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single coerced option value.
///
/// `Null` marks an option that was declared but never supplied and has no
/// default; it only appears in a [`Values`] map when the parser was asked to
/// keep undefined keys.
///
/// # Examples
///
/// ```
/// use cmdtree_core::Value;
///
/// let count = Value::Number(3.0);
/// assert_eq!(count.as_number(), Some(3.0));
/// assert_eq!(count.as_str(), None);
/// assert!(!count.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Declared but undefined.
    Null,
    /// Boolean flag value.
    Bool(bool),
    /// Numeric value; integer constraints are enforced at parse time.
    Number(f64),
    /// String or positional value.
    String(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// Parses the boolean spellings accepted on the command line.
///
/// `true`/`false` match case-insensitively; `1` and `0` are accepted as
/// spelled. Anything else is not a boolean literal.
///
/// # Examples
///
/// ```
/// use cmdtree_core::parse_bool_literal;
///
/// assert_eq!(parse_bool_literal("TRUE"), Some(true));
/// assert_eq!(parse_bool_literal("0"), Some(false));
/// assert_eq!(parse_bool_literal("yes"), None);
/// ```
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    if text == "1" || text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text == "0" || text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// The typed option map produced by a successful parse.
///
/// Keys are option declaration keys. The map is single-valued: a repeated
/// flag overwrites its previous value.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Value, Values};
///
/// let mut values = Values::new();
/// values.insert("verbose", true);
/// values.insert("count", 2.0);
/// values.insert("mode", "fast");
///
/// assert_eq!(values.bool("verbose"), Some(true));
/// assert_eq!(values.number("count"), Some(2.0));
/// assert_eq!(values.str("mode"), Some("fast"));
/// assert_eq!(values.get("missing"), None);
/// assert_eq!(values.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    entries: BTreeMap<String, Value>,
}

impl Values {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Looks up the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` when `key` is present, even with a [`Value::Null`].
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Boolean accessor; `None` when absent or not a boolean.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Numeric accessor; `None` when absent or not a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    /// String accessor; `None` when absent or not a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Number of keys in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no keys are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
