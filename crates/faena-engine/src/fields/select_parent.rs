use tracing::debug;

use faena_core::keys;
use faena_core::models::answer::{Answer, AnswerValue};
use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::option::{find_option, OptionValue};
use faena_core::models::view::{ChildSelect, FieldControl};

use super::{unsupported, Field, REQUIRED};
use crate::error::EngineError;
use crate::messages;
use crate::state::EngineState;

/// Single choice whose value unlocks a child option list.
///
/// Choosing a parent value clears the previous child (and any `queryValues`
/// dependents) and publishes the matching `subParams` entry under the
/// parent's id. No matching entry publishes an empty list.
pub struct SelectParentField;

fn selected(state: &EngineState, key: &str) -> Option<OptionValue> {
    match state.answers.get(key).map(|a| &a.value) {
        Some(AnswerValue::Choice(v)) => Some(v.clone()),
        _ => None,
    }
}

impl SelectParentField {
    fn choose_parent(
        &self,
        question: &Question,
        value: OptionValue,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        let option = find_option(&question.values, &value)
            .cloned()
            .ok_or_else(|| EngineError::UnknownOption {
                question_id: question.id.clone(),
                value: value.to_string(),
            })?;

        state.answers.set(question.id.clone(), Answer::choice(&option));
        state.clear_dependents(&question.id);

        let children = question
            .sub_param_for(&option.value)
            .map(|s| s.values.clone())
            .unwrap_or_default();
        debug!(
            question_id = %question.id,
            value = %option.value,
            children = children.len(),
            "publishing child options"
        );
        state.options.publish(&question.id, children);

        Ok(FieldEvent {
            question_id: question.id.clone(),
            value: Some(AnswerValue::Choice(option.value)),
            text: option.text,
        })
    }

    fn choose_child(
        &self,
        question: &Question,
        value: OptionValue,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        let option = find_option(state.options.get(&question.id), &value)
            .cloned()
            .ok_or_else(|| EngineError::UnknownOption {
                question_id: keys::child_answer(&question.id),
                value: value.to_string(),
            })?;

        let key = keys::child_answer(&question.id);
        state.answers.set(key.clone(), Answer::choice(&option));

        Ok(FieldEvent {
            question_id: key,
            value: Some(AnswerValue::Choice(option.value)),
            text: option.text,
        })
    }
}

impl Field for SelectParentField {
    fn kind(&self) -> QuestionType {
        QuestionType::SelectParent
    }

    fn render(&self, question: &Question, state: &EngineState) -> Option<FieldControl> {
        let child = question.has_children().then(|| {
            let options = state.options.get(&question.id).to_vec();
            ChildSelect {
                disabled: options.is_empty(),
                selected: selected(state, &keys::child_answer(&question.id)),
                options,
            }
        });

        Some(FieldControl::SelectParent {
            options: question.values.clone(),
            selected: selected(state, &question.id),
            child,
        })
    }

    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        match input {
            FieldInput::Select { value } => self.choose_parent(question, value, state),
            FieldInput::Child { value } => self.choose_child(question, value, state),
            other => Err(unsupported(question, &other)),
        }
    }

    fn check_required(&self, question: &Question, state: &EngineState) -> Option<String> {
        if !state.answers.is_answered(&question.id) {
            return Some(REQUIRED.to_string());
        }
        let child_needed = question.has_children() && !state.options.get(&question.id).is_empty();
        if child_needed && !state.answers.is_answered(&keys::child_answer(&question.id)) {
            return Some(messages::CHOOSE_SUB_OPTION.to_string());
        }
        None
    }
}
