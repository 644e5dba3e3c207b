use std::collections::BTreeMap;

use jiff::civil::DateTime;
use tracing::warn;

use faena_core::keys;
use faena_core::models::answer::AnswerMap;
use faena_core::models::descriptor::{FormDescriptor, Question, QuestionType};
use faena_core::window::ValidityWindow;

use crate::attachments::AttachmentStore;
use crate::loader;
use crate::options::DynamicOptions;

/// Everything the engine knows about the form on screen.
#[derive(Debug, Default)]
pub struct EngineState {
    descriptor: Option<FormDescriptor>,
    sorted: Vec<Question>,
    window: ValidityWindow,
    pub(crate) answers: AnswerMap,
    pub(crate) comments: BTreeMap<String, String>,
    pub(crate) options: DynamicOptions,
    pub(crate) attachments: AttachmentStore,
}

impl EngineState {
    /// Drop the descriptor and every piece of runtime state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Install a freshly fetched descriptor on a clean slate.
    pub fn apply(&mut self, descriptor: FormDescriptor) {
        self.reset();
        self.window = ValidityWindow::from_descriptor(&descriptor).unwrap_or_else(|e| {
            warn!(form_id = descriptor.id, error = %e, "ignoring unparseable validity window");
            ValidityWindow::default()
        });
        self.sorted = loader::sort_questions(&descriptor.form.questions);
        self.descriptor = Some(descriptor);
        self.reset_answers();
    }

    /// Clear answers, comments, dependent lists and pictures, then reseed hidden defaults.
    pub fn reset_answers(&mut self) {
        self.answers.clear();
        self.comments.clear();
        self.options.clear();
        self.attachments.clear();
        loader::seed_hidden(&self.sorted, &mut self.answers);
    }

    pub fn descriptor(&self) -> Option<&FormDescriptor> {
        self.descriptor.as_ref()
    }

    /// Questions in render order: `order` ascending, ties as received.
    pub fn sorted_questions(&self) -> &[Question] {
        &self.sorted
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.sorted.iter().find(|q| q.id == id)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn comment(&self, question_id: &str) -> Option<&str> {
        self.comments.get(question_id).map(String::as_str)
    }

    pub fn options(&self) -> &DynamicOptions {
        &self.options
    }

    pub fn attachments(&self) -> &AttachmentStore {
        &self.attachments
    }

    pub fn is_read_only_at(&self, now: DateTime) -> bool {
        match &self.descriptor {
            Some(d) => d.declared_read_only() || !self.window.contains(now),
            None => true,
        }
    }

    /// Drop the answers of `select_parent` children and of every question
    /// whose options come from `parent_id`.
    pub(crate) fn clear_dependents(&mut self, parent_id: &str) {
        self.answers.remove(&keys::child_answer(parent_id));

        let dependents: Vec<String> = self
            .sorted
            .iter()
            .filter(|q| q.depends_on() == Some(parent_id))
            .filter(|q| matches!(q.kind, QuestionType::Select | QuestionType::MultipleChoice))
            .map(|q| q.id.clone())
            .collect();

        for id in dependents {
            self.answers.remove(&id);
        }
    }
}
