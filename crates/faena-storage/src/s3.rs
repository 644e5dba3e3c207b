use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::info;

use faena_core::keys;

use crate::error::StorageError;
use crate::objects;
use crate::upload::{PictureUpload, PictureUploader};

/// Uploads pictures straight into a bucket under `pictures/{form}/{question}/`.
pub struct S3Uploader {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Uploader {
    pub fn new(client: Client, bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            region: region.into(),
        }
    }
}

#[async_trait]
impl PictureUploader for S3Uploader {
    async fn upload(&self, picture: &PictureUpload) -> Result<String, StorageError> {
        let key = keys::picture_object(
            picture.form_id,
            &picture.question_id,
            &picture.attachment_id,
            &picture.file_name,
        );

        objects::put_object(
            &self.client,
            &self.bucket,
            &key,
            picture.bytes.clone(),
            Some(&picture.content_type),
        )
        .await?;

        info!(bucket = %self.bucket, key = %key, "picture stored");
        Ok(objects::object_url(&self.bucket, &self.region, &key))
    }
}
