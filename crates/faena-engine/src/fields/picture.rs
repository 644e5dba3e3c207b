use tracing::debug;

use faena_core::models::answer::{Answer, AnswerValue};
use faena_core::models::descriptor::{Question, QuestionType};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::view::{FieldControl, PicturePreview};

use super::{unsupported, Field, REQUIRED};
use crate::attachments::PictureAttachment;
use crate::error::EngineError;
use crate::messages;
use crate::state::EngineState;

/// Local image files, previewed immediately, bounded by `allowPictures`.
pub struct PictureField;

impl PictureField {
    /// Mirror the attachment list into the answer map and describe it.
    fn sync_answer(question: &Question, state: &mut EngineState) -> FieldEvent {
        let list = state.attachments.list(&question.id);
        let ids: Vec<String> = list.iter().map(|a| a.id.clone()).collect();
        let text = list
            .iter()
            .map(|a| a.file_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let value = AnswerValue::Pictures(ids);
        state
            .answers
            .set(question.id.clone(), Answer::new(value.clone(), text.clone()));

        FieldEvent {
            question_id: question.id.clone(),
            value: Some(value),
            text,
        }
    }
}

impl Field for PictureField {
    fn kind(&self) -> QuestionType {
        QuestionType::Picture
    }

    fn render(&self, question: &Question, state: &EngineState) -> Option<FieldControl> {
        let bounds = question.picture_bounds();
        let previews: Vec<PicturePreview> = state
            .attachments
            .list(&question.id)
            .iter()
            .map(|a| PicturePreview {
                attachment_id: a.id.clone(),
                file_name: a.file_name.clone(),
                data_uri: a.preview_data_uri.clone(),
                uploaded: !a.is_pending(),
            })
            .collect();

        Some(FieldControl::Picture {
            can_add: (previews.len() as u64) < u64::from(bounds.max),
            previews,
            min: bounds.min,
            max: bounds.max,
        })
    }

    fn apply(
        &self,
        question: &Question,
        input: FieldInput,
        state: &mut EngineState,
    ) -> Result<FieldEvent, EngineError> {
        match input {
            FieldInput::AddPicture { file_name, bytes } => {
                let max = question.picture_bounds().max;
                if state.attachments.count(&question.id) as u64 >= u64::from(max) {
                    return Err(EngineError::TooManyPictures {
                        question_id: question.id.clone(),
                        max,
                    });
                }

                let attachment = PictureAttachment::from_file(file_name, bytes)?;
                debug!(
                    question_id = %question.id,
                    file_name = %attachment.file_name,
                    content_type = %attachment.content_type,
                    "picture added"
                );
                state.attachments.add(&question.id, attachment);
                Ok(Self::sync_answer(question, state))
            }
            FieldInput::RemovePicture { index } => {
                state
                    .attachments
                    .remove(&question.id, index)
                    .ok_or_else(|| EngineError::NoSuchPicture {
                        question_id: question.id.clone(),
                        index,
                    })?;
                Ok(Self::sync_answer(question, state))
            }
            other => Err(unsupported(question, &other)),
        }
    }

    fn check_required(&self, question: &Question, state: &EngineState) -> Option<String> {
        let count = state.attachments.count(&question.id);
        let min = question.picture_bounds().min as usize;
        if count == 0 {
            Some(REQUIRED.to_string())
        } else if count < min {
            Some(messages::min_pictures(min))
        } else {
            None
        }
    }
}
