use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// One field that blocks submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{question_name}: {message}")]
pub struct ValidationIssue {
    pub question_id: String,
    pub question_name: String,
    pub message: String,
}
