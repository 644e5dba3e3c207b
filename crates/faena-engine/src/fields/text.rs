use faena_core::models::answer::{Answer, AnswerValue};
use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::view::FieldControl;

use super::{unsupported, Field};
use crate::error::EngineError;
use crate::state::EngineState;

pub struct TextField;

impl Field for TextField {
    fn kind(&self) -> QuestionType {
        QuestionType::Text
    }

    fn render(&self, question: &Question, state: &EngineState) -> Option<FieldControl> {
        let value = state
            .answers
            .get(&question.id)
            .map(|a| a.text.clone())
            .unwrap_or_default();
        Some(FieldControl::Text { value })
    }

    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        let FieldInput::Text { text } = input else {
            return Err(unsupported(question, &input));
        };

        let value = AnswerValue::Text(text.clone());
        state
            .answers
            .set(question.id.clone(), Answer::new(value.clone(), text.clone()));

        Ok(FieldEvent {
            question_id: question.id.clone(),
            value: Some(value),
            text,
        })
    }
}
