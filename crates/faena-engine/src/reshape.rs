//! Rebuild the descriptor's body with the user's answers in place of the
//! option universe. Pure: the same state always yields the same body.

use faena_core::keys;
use faena_core::models::answer::{Answer, AnswerValue};
use faena_core::models::descriptor::{FormBody, Question, QuestionType, SubParam};
use faena_core::models::option::{find_option, FormValue, OptionValue};

use crate::error::EngineError;
use crate::state::EngineState;

/// Questions keep descriptor order; each one's `values` becomes exactly what
/// was answered (empty when unanswered).
pub fn reshape(state: &EngineState) -> Result<FormBody, EngineError> {
    let descriptor = state.descriptor().ok_or(EngineError::NotLoaded)?;
    let body = &descriptor.form;

    Ok(FormBody {
        form_id: body.form_id,
        version: body.version,
        read_only: body.read_only,
        questions: body
            .questions
            .iter()
            .map(|q| reshape_question(q, state))
            .collect(),
    })
}

fn reshape_question(question: &Question, state: &EngineState) -> Question {
    let answer = state.answers().get(&question.id).filter(|a| !a.is_empty());

    let values = match question.kind {
        QuestionType::Picture => picture_values(question, state),
        _ => answer.map(answer_values).unwrap_or_default(),
    };

    let sub_params = match question.kind {
        QuestionType::SelectParent => question
            .sub_params
            .as_ref()
            .map(|subs| chosen_sub_params(question, subs, state)),
        _ => question.sub_params.clone(),
    };

    let comment = if question.allow_comment {
        state.comment(&question.id).map(str::to_string)
    } else {
        None
    };

    Question {
        values,
        sub_params,
        comment,
        ..question.clone()
    }
}

fn answer_values(answer: &Answer) -> Vec<FormValue> {
    match &answer.value {
        AnswerValue::Text(text) => vec![FormValue::new(text.clone(), answer.text.clone())],
        AnswerValue::Choice(value) => vec![FormValue::new(value.clone(), answer.text.clone())],
        AnswerValue::Choices(values) => values.clone(),
        // Picture answers are rebuilt from the attachment store.
        AnswerValue::Pictures(_) => Vec::new(),
    }
}

/// Uploaded URLs in attachment order; slots whose upload failed are skipped.
fn picture_values(question: &Question, state: &EngineState) -> Vec<FormValue> {
    state
        .attachments()
        .list(&question.id)
        .iter()
        .filter_map(|a| {
            let url = a.remote_url.as_deref().filter(|u| !u.is_empty())?;
            Some(FormValue::new(url, a.file_name.clone()))
        })
        .collect()
}

/// At most the entry matching the chosen parent, holding at most the chosen child.
fn chosen_sub_params(question: &Question, subs: &[SubParam], state: &EngineState) -> Vec<SubParam> {
    let Some(parent) = choice(state.answers().get(&question.id)) else {
        return Vec::new();
    };
    let Some(entry) = subs.iter().find(|s| s.opt.to_string() == parent.to_string()) else {
        return Vec::new();
    };

    let child_answer = state.answers().get(&keys::child_answer(&question.id));
    let values = match choice(child_answer) {
        Some(child) => find_option(&entry.values, child)
            .map(|option| {
                let text = child_answer.map(|a| a.text.clone()).unwrap_or_else(|| option.text.clone());
                vec![FormValue::new(option.value.clone(), text)]
            })
            .unwrap_or_default(),
        None => Vec::new(),
    };

    vec![SubParam {
        opt: entry.opt.clone(),
        values,
    }]
}

fn choice(answer: Option<&Answer>) -> Option<&OptionValue> {
    match answer.map(|a| &a.value) {
        Some(AnswerValue::Choice(v)) if !v.is_blank() => Some(v),
        _ => None,
    }
}
