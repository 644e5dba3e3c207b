use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::option::{FormValue, OptionValue};

/// Submit button text when the descriptor has no `buttonAction`.
pub const DEFAULT_SUBMIT_LABEL: &str = "Enviar";

/// The schema for one form instance, as served by the backend.
/// Immutable once loaded; a reload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormDescriptor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
    /// Tri-state override of `form.read_only`: `None` defers to the body.
    #[serde(default)]
    pub form_read_only: Option<bool>,
    #[serde(default)]
    pub button_action: Option<String>,
    pub form: FormBody,
}

impl FormDescriptor {
    /// Read-only as declared by the descriptor, ignoring the validity window.
    pub fn declared_read_only(&self) -> bool {
        self.form_read_only.unwrap_or(self.form.read_only)
    }

    pub fn submit_label(&self) -> &str {
        self.button_action.as_deref().unwrap_or(DEFAULT_SUBMIT_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormBody {
    pub form_id: i64,
    pub version: i64,
    #[serde(default)]
    pub read_only: bool,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    /// Never rendered; its first static value is submitted as-is.
    Hidden,
    /// Single choice that publishes a child option list from `sub_params`.
    SelectParent,
    Select,
    Text,
    MultipleChoice,
    Picture,
}

/// One form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allow_comment: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub values: Vec<FormValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_params: Option<Vec<SubParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_values: Option<QueryValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_pictures: Option<PictureBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Question {
    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }

    /// The question whose selection feeds this one's options, if any.
    pub fn depends_on(&self) -> Option<&str> {
        self.query_values.as_ref().map(|q| q.id.as_str())
    }

    pub fn has_children(&self) -> bool {
        self.sub_params.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// The `sub_params` entry unlocked by `selected`, compared by string form.
    pub fn sub_param_for(&self, selected: &OptionValue) -> Option<&SubParam> {
        let wanted = selected.to_string();
        self.sub_params
            .as_deref()?
            .iter()
            .find(|s| s.opt.to_string() == wanted)
    }

    pub fn picture_bounds(&self) -> PictureBounds {
        self.allow_pictures.unwrap_or_default()
    }
}

/// Maps one parent option to the child options it unlocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubParam {
    pub opt: OptionValue,
    #[serde(default)]
    pub values: Vec<FormValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QueryValues {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PictureBounds {
    #[serde(default)]
    pub min: u32,
    #[serde(default = "unbounded")]
    pub max: u32,
}

fn unbounded() -> u32 {
    u32::MAX
}

impl Default for PictureBounds {
    fn default() -> Self {
        Self {
            min: 0,
            max: u32::MAX,
        }
    }
}
