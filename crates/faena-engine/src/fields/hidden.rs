use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::view::FieldControl;

use super::{unsupported, Field};
use crate::error::EngineError;
use crate::state::EngineState;

/// Seeded at load time and submitted untouched.
pub struct HiddenField;

impl Field for HiddenField {
    fn kind(&self) -> QuestionType {
        QuestionType::Hidden
    }

    fn render(&self, _question: &Question, _state: &EngineState) -> Option<FieldControl> {
        None
    }

    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        _state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        Err(unsupported(question, &input))
    }
}
