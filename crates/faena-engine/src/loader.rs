//! Descriptor loading.

use tracing::{info, warn};

use faena_client::backend::FormBackend;
use faena_core::models::answer::{Answer, AnswerMap};
use faena_core::models::descriptor::{Question, QuestionType};

use crate::error::EngineError;
use crate::messages;
use crate::state::EngineState;

/// Fetch the descriptor for `(case_id, user_id)` into `state`.
///
/// State is wiped before the request goes out, so a failed load never
/// leaves the previous form (or half of a new one) behind.
pub async fn load(
    state: &mut EngineState,
    backend: &dyn FormBackend,
    case_id: &str,
    user_id: i64,
) -> Result<(), EngineError> {
    state.reset();

    match backend.fetch_form(case_id, user_id).await {
        Ok(descriptor) => {
            info!(
                case_id,
                form_id = descriptor.id,
                questions = descriptor.form.questions.len(),
                "form loaded"
            );
            state.apply(descriptor);
            Ok(())
        }
        Err(e) => {
            warn!(case_id, error = %e, "form load failed");
            let message = e
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| messages::LOAD_FAILURE.to_string());
            Err(EngineError::Load { message })
        }
    }
}

/// Stable sort by `order`.
pub fn sort_questions(questions: &[Question]) -> Vec<Question> {
    let mut sorted = questions.to_vec();
    sorted.sort_by_key(|q| q.order);
    sorted
}

/// Hidden questions are never rendered but still submitted: seed each with
/// its first static value.
pub fn seed_hidden(questions: &[Question], answers: &mut AnswerMap) {
    for q in questions.iter().filter(|q| q.kind == QuestionType::Hidden) {
        if let Some(first) = q.values.first() {
            answers.set(q.id.clone(), Answer::choice(first));
        }
    }
}
