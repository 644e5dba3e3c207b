use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::upload::{PictureUpload, PictureUploader};

/// Multipart POST of a single `file` part to an upload endpoint that answers `{url}`.
pub struct HttpUploader {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
}

impl HttpUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PictureUploader for HttpUploader {
    async fn upload(&self, picture: &PictureUpload) -> Result<String, StorageError> {
        debug!(
            question_id = %picture.question_id,
            file_name = %picture.file_name,
            bytes = picture.bytes.len(),
            "uploading picture"
        );

        let part = Part::bytes(picture.bytes.clone())
            .file_name(picture.file_name.clone())
            .mime_str(&picture.content_type)
            .map_err(|_| StorageError::ContentType(picture.content_type.clone()))?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
            });
        }

        let body: UploadResponse = serde_json::from_slice(&resp.bytes().await?)?;
        let url = body
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or(StorageError::MissingUrl)?;

        info!(question_id = %picture.question_id, url = %url, "picture uploaded");
        Ok(url)
    }
}
