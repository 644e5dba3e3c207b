use thiserror::Error;

use faena_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("backend rejected the request: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("malformed response: {0}")]
    Decode(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The message the server supplied, if any, to show the user verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } | ClientError::Rejected { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}
