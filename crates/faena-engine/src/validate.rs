use faena_core::models::issue::ValidationIssue;

use crate::fields::field_for;
use crate::state::EngineState;

/// Check every required question against the current answers. Never touches the network.
pub fn validate(state: &EngineState) -> Vec<ValidationIssue> {
    state
        .sorted_questions()
        .iter()
        .filter(|q| q.required)
        .filter_map(|q| {
            field_for(q.kind)
                .check_required(q, state)
                .map(|message| ValidationIssue {
                    question_id: q.id.clone(),
                    question_name: q.name.clone(),
                    message,
                })
        })
        .collect()
}

pub fn is_valid(state: &EngineState) -> bool {
    validate(state).is_empty()
}
