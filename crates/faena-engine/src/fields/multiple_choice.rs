use faena_core::models::answer::{Answer, AnswerValue};
use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::option::{find_option, FormValue};
use faena_core::models::view::FieldControl;

use super::{unsupported, Field};
use crate::error::EngineError;
use crate::messages;
use crate::options;
use crate::state::EngineState;

pub struct MultipleChoiceField;

impl Field for MultipleChoiceField {
    fn kind(&self) -> QuestionType {
        QuestionType::MultipleChoice
    }

    fn render(&self, question: &Question, state: &EngineState) -> Option<FieldControl> {
        let selected = match state.answers.get(&question.id).map(|a| &a.value) {
            Some(AnswerValue::Choices(values)) => values.iter().map(|v| v.value.clone()).collect(),
            _ => Vec::new(),
        };
        Some(FieldControl::MultipleChoice {
            options: options::resolve(question, &state.options).to_vec(),
            selected,
        })
    }

    /// Replaces the whole selection; duplicates collapse to the first occurrence.
    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        let FieldInput::Choices { values } = input else {
            return Err(unsupported(question, &input));
        };

        let available = options::resolve(question, &state.options);
        let mut chosen: Vec<FormValue> = Vec::with_capacity(values.len());
        for value in &values {
            let option = find_option(available, value).ok_or_else(|| EngineError::UnknownOption {
                question_id: question.id.clone(),
                value: value.to_string(),
            })?;
            if !chosen.iter().any(|c| c.value.matches(&option.value)) {
                chosen.push(option.clone());
            }
        }

        let text = chosen
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let value = AnswerValue::Choices(chosen);
        state
            .answers
            .set(question.id.clone(), Answer::new(value.clone(), text.clone()));

        Ok(FieldEvent {
            question_id: question.id.clone(),
            value: Some(value),
            text,
        })
    }

    fn check_required(&self, question: &Question, state: &EngineState) -> Option<String> {
        (!state.answers.is_answered(&question.id)).then(|| messages::SELECT_AT_LEAST_ONE.to_string())
    }
}
