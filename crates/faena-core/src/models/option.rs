use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The value half of an option. The backend sends either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum OptionValue {
    Int(i64),
    Text(String),
}

impl OptionValue {
    /// True for an empty string. Numbers are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            OptionValue::Int(_) => false,
            OptionValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Compare by string form, so `1` matches `"1"`.
    pub fn matches(&self, other: &OptionValue) -> bool {
        match (self, other) {
            (OptionValue::Int(a), OptionValue::Int(b)) => a == b,
            (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

/// A `{value, text}` pair: one selectable option, or one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormValue {
    pub value: OptionValue,
    #[serde(default)]
    pub text: String,
}

impl FormValue {
    pub fn new(value: impl Into<OptionValue>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Find the option whose value matches `value`.
pub fn find_option<'a>(options: &'a [FormValue], value: &OptionValue) -> Option<&'a FormValue> {
    options.iter().find(|o| o.value.matches(value))
}
