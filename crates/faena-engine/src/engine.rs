use std::sync::Arc;

use jiff::civil::DateTime;
use jiff::Zoned;
use tokio::sync::watch;
use tracing::{info, warn};

use faena_client::backend::FormBackend;
use faena_core::keys;
use faena_core::models::answer::AnswerMap;
use faena_core::models::descriptor::{FormBody, FormDescriptor, Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::issue::ValidationIssue;
use faena_core::models::request::{SubmissionData, SubmitFormRequest};
use faena_core::models::state::{LoadState, SubmissionState};
use faena_core::models::view::{FieldView, FormView};
use faena_storage::upload::PictureUploader;

use crate::error::EngineError;
use crate::fields::field_for;
use crate::messages;
use crate::state::EngineState;
use crate::{loader, reshape, upload, validate};

#[derive(Debug, Clone, PartialEq, Eq)]
struct LoadTarget {
    case_id: String,
    user_id: i64,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub message: Option<String>,
    /// Whether the fresh copy of the form loaded after the submit.
    pub reloaded: bool,
}

/// One form on screen: its descriptor, the user's answers and the
/// submission pipeline (`Idle -> Uploading -> Submitting -> Success | Failed`).
///
/// Failures are never retried automatically. Calling
/// [`FormEngine::submit_form`] again re-runs the pipeline from validation.
pub struct FormEngine {
    backend: Arc<dyn FormBackend>,
    uploader: Arc<dyn PictureUploader>,
    state: EngineState,
    load_state: LoadState,
    target: Option<LoadTarget>,
    submission: watch::Sender<SubmissionState>,
}

impl FormEngine {
    pub fn new(backend: Arc<dyn FormBackend>, uploader: Arc<dyn PictureUploader>) -> Self {
        let (submission, _) = watch::channel(SubmissionState::Idle);
        Self {
            backend,
            uploader,
            state: EngineState::default(),
            load_state: LoadState::Empty,
            target: None,
            submission,
        }
    }

    /// Watch submission progress.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.submission.subscribe()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission.borrow().clone()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn descriptor(&self) -> Option<&FormDescriptor> {
        self.state.descriptor()
    }

    pub fn sorted_questions(&self) -> &[Question] {
        self.state.sorted_questions()
    }

    pub fn answers(&self) -> &AnswerMap {
        self.state.answers()
    }

    fn transition(&self, next: SubmissionState) {
        info!(state = ?next, "submission state");
        self.submission.send_replace(next);
    }

    /// Fetch and install the form for `(case_id, user_id)`.
    pub async fn load(&mut self, case_id: &str, user_id: i64) -> Result<(), EngineError> {
        self.target = Some(LoadTarget {
            case_id: case_id.to_string(),
            user_id,
        });
        self.transition(SubmissionState::Idle);
        self.load_state = LoadState::Loading;

        match loader::load(&mut self.state, self.backend.as_ref(), case_id, user_id).await {
            Ok(()) => {
                self.load_state = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    EngineError::Load { message } => message.clone(),
                    other => other.to_string(),
                };
                self.load_state = LoadState::Failed { message };
                Err(e)
            }
        }
    }

    /// Re-run the last load.
    pub async fn retry_load(&mut self) -> Result<(), EngineError> {
        let target = self.target.clone().ok_or(EngineError::NotLoaded)?;
        self.load(&target.case_id, target.user_id).await
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only_at(Zoned::now().datetime())
    }

    /// Declared read-only, or `now` falls outside the validity window.
    pub fn is_read_only_at(&self, now: DateTime) -> bool {
        self.state.is_read_only_at(now)
    }

    pub fn render(&self) -> Result<FormView, EngineError> {
        let descriptor = self.state.descriptor().ok_or(EngineError::NotLoaded)?;
        let read_only = self.is_read_only();

        let fields = self
            .state
            .sorted_questions()
            .iter()
            .filter_map(|q| self.field_view(q, read_only))
            .collect();

        Ok(FormView {
            id: descriptor.id,
            name: descriptor.name.clone(),
            instructions: descriptor.instructions.clone(),
            submit_label: descriptor.submit_label().to_string(),
            read_only,
            fields,
        })
    }

    /// `Ok(None)` for hidden questions.
    pub fn render_field(&self, question_id: &str) -> Result<Option<FieldView>, EngineError> {
        let question = self
            .state
            .question(question_id)
            .ok_or_else(|| EngineError::UnknownQuestion(question_id.to_string()))?;
        Ok(self.field_view(question, self.is_read_only()))
    }

    fn field_view(&self, question: &Question, form_read_only: bool) -> Option<FieldView> {
        let control = field_for(question.kind).render(question, &self.state)?;
        Some(FieldView {
            question_id: question.id.clone(),
            name: question.name.clone(),
            required: question.required,
            disabled: form_read_only || question.is_read_only(),
            allow_comment: question.allow_comment,
            comment: self.state.comment(&question.id).map(str::to_string),
            control,
        })
    }

    /// Apply one user input to one question.
    pub fn handle(&mut self, question_id: &str, input: FieldInput) -> Result<FieldEvent, EngineError> {
        if self.submission_state().is_busy() {
            return Err(EngineError::Busy);
        }
        if self.is_read_only() {
            return Err(EngineError::ReadOnly);
        }

        let (question, input) = self.route(question_id, input)?;
        if question.is_read_only() {
            return Err(EngineError::QuestionReadOnly(question.id));
        }

        match input {
            FieldInput::Comment { text } => self.set_comment(&question, text),
            other => field_for(question.kind).apply(&question, other, &mut self.state),
        }
    }

    /// Find the question an input is for. `<parent>_child` addresses the
    /// inline child select of a `select_parent`.
    fn route(&self, question_id: &str, input: FieldInput) -> Result<(Question, FieldInput), EngineError> {
        if let Some(question) = self.state.question(question_id) {
            return Ok((question.clone(), input));
        }

        let parent = keys::parent_of_child(question_id)
            .and_then(|id| self.state.question(id))
            .filter(|q| q.kind == QuestionType::SelectParent)
            .ok_or_else(|| EngineError::UnknownQuestion(question_id.to_string()))?;
        let input = match input {
            FieldInput::Select { value } => FieldInput::Child { value },
            other => other,
        };
        Ok((parent.clone(), input))
    }

    fn set_comment(&mut self, question: &Question, text: String) -> Result<FieldEvent, EngineError> {
        if !question.allow_comment {
            return Err(EngineError::CommentsNotAllowed(question.id.clone()));
        }
        if text.trim().is_empty() {
            self.state.comments.remove(&question.id);
        } else {
            self.state.comments.insert(question.id.clone(), text.clone());
        }
        Ok(FieldEvent {
            question_id: question.id.clone(),
            value: None,
            text,
        })
    }

    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        validate::validate(&self.state)
    }

    pub fn is_form_valid(&self) -> bool {
        validate::is_valid(&self.state)
    }

    /// Clear every answer and picture, keeping the loaded descriptor.
    pub fn reset(&mut self) {
        self.state.reset_answers();
        self.transition(SubmissionState::Idle);
    }

    pub fn reshape(&self) -> Result<FormBody, EngineError> {
        reshape::reshape(&self.state)
    }

    /// Validate, upload pending pictures, reshape and submit.
    ///
    /// Validation failures return before any state transition or network
    /// call. On success the form is reloaded from the backend.
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome, EngineError> {
        if self.submission_state().is_busy() {
            return Err(EngineError::Busy);
        }
        let target = self.target.clone().ok_or(EngineError::NotLoaded)?;
        let (form_id, name) = {
            let d = self.state.descriptor().ok_or(EngineError::NotLoaded)?;
            (d.id, d.name.clone())
        };
        if self.is_read_only() {
            return Err(EngineError::ReadOnly);
        }

        let issues = self.validation_issues();
        if !issues.is_empty() {
            warn!(form_id, issues = issues.len(), "form is not valid, not submitting");
            return Err(EngineError::Validation(issues));
        }

        let jobs = upload::pending_uploads(&self.state, form_id);
        if !jobs.is_empty() {
            self.transition(SubmissionState::Uploading { pending: jobs.len() });
            let uploader = Arc::clone(&self.uploader);
            let uploaded = upload::upload_all(uploader.as_ref(), jobs).await;
            upload::record(&mut self.state, &uploaded);
        }

        let form = self.reshape()?;
        let request = SubmitFormRequest::insert(target.user_id, SubmissionData { id: form_id, name, form });

        self.transition(SubmissionState::Submitting);
        match self.backend.submit_form(&request).await {
            Ok(receipt) => {
                info!(form_id, "submission accepted");
                self.transition(SubmissionState::Success);
                let reloaded = self.load(&target.case_id, target.user_id).await.is_ok();
                Ok(SubmitOutcome {
                    message: receipt.message,
                    reloaded,
                })
            }
            Err(e) => {
                warn!(form_id, error = %e, "submission failed");
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| messages::SUBMIT_FAILURE.to_string());
                self.transition(SubmissionState::Failed {
                    message: message.clone(),
                });
                Err(EngineError::Submit { message })
            }
        }
    }
}
