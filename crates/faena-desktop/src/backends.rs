use std::sync::Arc;

use faena_client::backend::FormBackend;
use faena_client::http::HttpBackend;
use faena_client::session::SessionStore;
use faena_storage::http::HttpUploader;
use faena_storage::s3::S3Uploader;
use faena_storage::upload::PictureUploader;

use crate::config::{FaenaConfig, UploadTarget};

/// The forms backend described by `config`, authenticated from `session`.
pub fn build_backend(config: &FaenaConfig, session: Arc<dyn SessionStore>) -> Arc<dyn FormBackend> {
    Arc::new(
        HttpBackend::new(config.backend_url.clone())
            .with_paths(config.fetch_path.clone(), config.submit_path.clone())
            .with_session(session),
    )
}

/// The picture uploader for the configured target. S3 uses the default
/// AWS credential chain.
pub async fn build_uploader(config: &FaenaConfig) -> Arc<dyn PictureUploader> {
    match &config.upload {
        UploadTarget::Http { endpoint } => Arc::new(HttpUploader::new(endpoint.clone())),
        UploadTarget::S3 { bucket, region } => {
            let client = faena_storage::client::build_client(region).await;
            Arc::new(S3Uploader::new(client, bucket.clone(), region.clone()))
        }
    }
}
