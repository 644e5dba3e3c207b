use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use uuid::Uuid;

use crate::error::EngineError;

/// A picture picked by the user. Held in memory only; once uploaded it also
/// remembers where it went, so a retried submit does not send it twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureAttachment {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview_data_uri: String,
    pub remote_url: Option<String>,
}

impl PictureAttachment {
    /// Sniff the bytes; anything that is not a recognised image format is rejected.
    pub fn from_file(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, EngineError> {
        let file_name = file_name.into();
        let format = image::guess_format(&bytes)
            .map_err(|_| EngineError::NotAnImage {
                file_name: file_name.clone(),
            })?;
        let content_type = format.to_mime_type().to_string();
        let preview_data_uri = format!("data:{content_type};base64,{}", STANDARD.encode(&bytes));

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            file_name,
            content_type,
            bytes,
            preview_data_uri,
            remote_url: None,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.remote_url.is_none()
    }
}

/// Attachments per picture question, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentStore(BTreeMap<String, Vec<PictureAttachment>>);

impl AttachmentStore {
    pub fn list(&self, question_id: &str) -> &[PictureAttachment] {
        self.0.get(question_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, question_id: &str) -> usize {
        self.list(question_id).len()
    }

    pub fn add(&mut self, question_id: &str, attachment: PictureAttachment) {
        self.0
            .entry(question_id.to_string())
            .or_default()
            .push(attachment);
    }

    pub fn remove(&mut self, question_id: &str, index: usize) -> Option<PictureAttachment> {
        let list = self.0.get_mut(question_id)?;
        (index < list.len()).then(|| list.remove(index))
    }

    pub fn mark_uploaded(&mut self, question_id: &str, index: usize, url: String) {
        if let Some(attachment) = self.0.get_mut(question_id).and_then(|l| l.get_mut(index)) {
            attachment.remote_url = Some(url);
        }
    }

    /// `(question_id, index, attachment)` for every attachment not yet uploaded.
    pub fn pending(&self) -> impl Iterator<Item = (&str, usize, &PictureAttachment)> {
        self.0.iter().flat_map(|(question_id, list)| {
            list.iter()
                .enumerate()
                .filter(|(_, a)| a.is_pending())
                .map(move |(index, a)| (question_id.as_str(), index, a))
        })
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
