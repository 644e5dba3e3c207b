//! Picture upload orchestration.
//!
//! Every pending attachment is uploaded concurrently and the batch is joined
//! before the pipeline moves on. A failed upload does not abort the batch:
//! its slot gets an empty sentinel URL and the submission continues with
//! whatever succeeded.

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{info, warn};

use faena_storage::upload::{PictureUpload, PictureUploader};

use crate::state::EngineState;

/// One attachment waiting to be uploaded, with its position in the question's list.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub question_id: String,
    pub index: usize,
    pub picture: PictureUpload,
}

/// Upload results keyed by `(question_id, index)`. Failures hold `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedPictures(BTreeMap<(String, usize), String>);

impl UploadedPictures {
    /// The URL for a slot, or `None` if it failed or was never attempted.
    pub fn url(&self, question_id: &str, index: usize) -> Option<&str> {
        self.0
            .get(&(question_id.to_string(), index))
            .map(String::as_str)
            .filter(|u| !u.is_empty())
    }

    pub fn succeeded(&self) -> usize {
        self.0.values().filter(|u| !u.is_empty()).count()
    }

    pub fn failed(&self) -> usize {
        self.0.values().filter(|u| u.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &str)> {
        self.0
            .iter()
            .map(|((question_id, index), url)| (question_id.as_str(), *index, url.as_str()))
    }
}

/// Collect every attachment that has not been uploaded yet.
pub fn pending_uploads(state: &EngineState, form_id: i64) -> Vec<PendingUpload> {
    state
        .attachments
        .pending()
        .map(|(question_id, index, a)| PendingUpload {
            question_id: question_id.to_string(),
            index,
            picture: PictureUpload {
                form_id,
                question_id: question_id.to_string(),
                attachment_id: a.id.clone(),
                file_name: a.file_name.clone(),
                content_type: a.content_type.clone(),
                bytes: a.bytes.clone(),
            },
        })
        .collect()
}

/// Upload all `jobs` in parallel and wait for every one of them.
pub async fn upload_all(uploader: &dyn PictureUploader, jobs: Vec<PendingUpload>) -> UploadedPictures {
    let tasks = jobs.into_iter().map(|job| async move {
        let url = match uploader.upload(&job.picture).await {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    question_id = %job.question_id,
                    index = job.index,
                    file_name = %job.picture.file_name,
                    error = %e,
                    "picture upload failed, continuing without it"
                );
                String::new()
            }
        };
        ((job.question_id, job.index), url)
    });

    let uploaded = UploadedPictures(join_all(tasks).await.into_iter().collect());
    info!(
        succeeded = uploaded.succeeded(),
        failed = uploaded.failed(),
        "picture uploads finished"
    );
    uploaded
}

/// Record successful URLs on their attachments; sentinel slots stay pending.
pub fn record(state: &mut EngineState, uploaded: &UploadedPictures) {
    for (question_id, index, url) in uploaded.iter() {
        if !url.is_empty() {
            state
                .attachments
                .mark_uploaded(question_id, index, url.to_string());
        }
    }
}
