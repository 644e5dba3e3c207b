use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where the submission pipeline currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionState {
    #[default]
    Idle,
    Uploading { pending: usize },
    Submitting,
    Success,
    Failed { message: String },
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Uploading { .. } | SubmissionState::Submitting)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Ready,
    /// The descriptor could not be fetched; no partial form is shown.
    Failed { message: String },
}
