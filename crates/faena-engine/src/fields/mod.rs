//! One strategy per question type.
//!
//! Every strategy turns a [`Question`] plus the current state into a
//! controlled input ([`FieldControl`]), applies user input back into the
//! answer map and says whether a required question is satisfied.

pub mod hidden;
pub mod multiple_choice;
pub mod picture;
pub mod select;
pub mod select_parent;
pub mod text;

use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::view::FieldControl;

use crate::error::EngineError;
use crate::state::EngineState;

pub trait Field: Send + Sync {
    fn kind(&self) -> QuestionType;

    /// `None` for questions that are never shown.
    fn render(&self, question: &Question, state: &EngineState) -> Option<FieldControl>;

    /// Apply one input. Read-only checks and comments are handled by the caller.
    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError>;

    /// Why a required question is not satisfied, if it isn't.
    fn check_required(&self, question: &Question, state: &EngineState) -> Option<String> {
        (!state.answers.is_answered(&question.id)).then(|| REQUIRED.to_string())
    }
}

pub use crate::messages::REQUIRED;

/// Look up the strategy for a question type.
pub fn field_for(kind: QuestionType) -> &'static dyn Field {
    match kind {
        QuestionType::Hidden => &hidden::HiddenField,
        QuestionType::SelectParent => &select_parent::SelectParentField,
        QuestionType::Select => &select::SelectField,
        QuestionType::Text => &text::TextField,
        QuestionType::MultipleChoice => &multiple_choice::MultipleChoiceField,
        QuestionType::Picture => &picture::PictureField,
    }
}

pub(crate) fn input_name(input: &FieldInput) -> &'static str {
    match input {
        FieldInput::Text { .. } => "text",
        FieldInput::Select { .. } => "select",
        FieldInput::Child { .. } => "child select",
        FieldInput::Choices { .. } => "multiple choice",
        FieldInput::AddPicture { .. } => "add picture",
        FieldInput::RemovePicture { .. } => "remove picture",
        FieldInput::Comment { .. } => "comment",
    }
}

pub(crate) fn unsupported(question: &Question, input: &FieldInput) -> EngineError {
    EngineError::UnsupportedInput {
        question_id: question.id.clone(),
        input: input_name(input),
    }
}
