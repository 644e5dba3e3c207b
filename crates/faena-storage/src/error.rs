use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upload endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("upload response had no url")]
    MissingUrl,

    #[error("invalid content type '{0}'")]
    ContentType(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),
}
