//! Render models handed to the front end, one per visible question.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::option::{FormValue, OptionValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldView {
    pub question_id: String,
    pub name: String,
    pub required: bool,
    pub disabled: bool,
    pub allow_comment: bool,
    pub comment: Option<String>,
    pub control: FieldControl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "control", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldControl {
    Text {
        value: String,
    },
    Select {
        options: Vec<FormValue>,
        selected: Option<OptionValue>,
    },
    SelectParent {
        options: Vec<FormValue>,
        selected: Option<OptionValue>,
        child: Option<ChildSelect>,
    },
    MultipleChoice {
        options: Vec<FormValue>,
        selected: Vec<OptionValue>,
    },
    Picture {
        previews: Vec<PicturePreview>,
        min: u32,
        max: u32,
        can_add: bool,
    },
}

/// Inline child select of a `select_parent`; disabled while its list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChildSelect {
    pub options: Vec<FormValue>,
    pub selected: Option<OptionValue>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PicturePreview {
    pub attachment_id: String,
    pub file_name: String,
    pub data_uri: String,
    pub uploaded: bool,
}

/// Everything the front end needs to draw the current form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormView {
    pub id: i64,
    pub name: String,
    pub instructions: Option<String>,
    pub submit_label: String,
    pub read_only: bool,
    pub fields: Vec<FieldView>,
}
