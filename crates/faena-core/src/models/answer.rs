use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::option::{FormValue, OptionValue};

/// What the user entered for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerValue {
    /// Free text, stored verbatim.
    Text(String),
    /// One option from a select.
    Choice(OptionValue),
    /// Zero or more options from a multiple-choice list, in selection order.
    Choices(Vec<FormValue>),
    /// Attachment ids of the pictures currently held for the question.
    Pictures(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Choice(v) => v.is_blank(),
            AnswerValue::Choices(v) => v.is_empty(),
            AnswerValue::Pictures(v) => v.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub value: AnswerValue,
    pub text: String,
}

impl Answer {
    pub fn new(value: AnswerValue, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }

    pub fn choice(option: &FormValue) -> Self {
        Self::new(AnswerValue::Choice(option.value.clone()), option.text.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Runtime answers keyed by question id. Inline child answers of a
/// `select_parent` live under [`crate::keys::child_answer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerMap(BTreeMap<String, Answer>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.0.insert(key.into(), answer)
    }

    pub fn remove(&mut self, key: &str) -> Option<Answer> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// True when `key` holds a non-empty answer.
    pub fn is_answered(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|a| !a.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.0.iter()
    }
}
