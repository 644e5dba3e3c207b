use async_trait::async_trait;

use crate::error::StorageError;

/// One picture ready to leave the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub form_id: i64,
    pub question_id: String,
    pub attachment_id: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stores a single picture and returns the URL it can be fetched from.
///
/// Implementations upload exactly one file per call; batching and partial
/// failure handling belong to the caller.
#[async_trait]
pub trait PictureUploader: Send + Sync {
    async fn upload(&self, picture: &PictureUpload) -> Result<String, StorageError>;
}
