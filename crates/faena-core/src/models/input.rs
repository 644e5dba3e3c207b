use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::AnswerValue;
use super::option::OptionValue;

/// A user interaction with one field, as sent by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "input", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldInput {
    Text { text: String },
    Select { value: OptionValue },
    /// Choice in the inline child select of a `select_parent`.
    Child { value: OptionValue },
    Choices { values: Vec<OptionValue> },
    AddPicture { file_name: String, bytes: Vec<u8> },
    RemovePicture { index: usize },
    Comment { text: String },
}

/// Emitted after a field change: the key written and what it now holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldEvent {
    pub question_id: String,
    pub value: Option<AnswerValue>,
    pub text: String,
}
