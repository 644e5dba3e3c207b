use faena_core::models::answer::{Answer, AnswerValue};
use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::option::find_option;
use faena_core::models::view::FieldControl;

use super::{unsupported, Field};
use crate::error::EngineError;
use crate::options;
use crate::state::EngineState;

/// Single choice from static values, or from a parent's published list when
/// `queryValues` is set.
pub struct SelectField;

impl Field for SelectField {
    fn kind(&self) -> QuestionType {
        QuestionType::Select
    }

    fn render(&self, question: &Question, state: &EngineState) -> Option<FieldControl> {
        let selected = match state.answers.get(&question.id).map(|a| &a.value) {
            Some(AnswerValue::Choice(v)) => Some(v.clone()),
            _ => None,
        };
        Some(FieldControl::Select {
            options: options::resolve(question, &state.options).to_vec(),
            selected,
        })
    }

    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        let FieldInput::Select { value } = input else {
            return Err(unsupported(question, &input));
        };

        let option = find_option(options::resolve(question, &state.options), &value)
            .cloned()
            .ok_or_else(|| EngineError::UnknownOption {
                question_id: question.id.clone(),
                value: value.to_string(),
            })?;

        state.answers.set(question.id.clone(), Answer::choice(&option));

        Ok(FieldEvent {
            question_id: question.id.clone(),
            value: Some(AnswerValue::Choice(option.value)),
            text: option.text,
        })
    }
}
