use async_trait::async_trait;

use faena_core::models::descriptor::FormDescriptor;
use faena_core::models::request::SubmitFormRequest;

use crate::error::ClientError;

/// What the backend said when it accepted a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub message: Option<String>,
}

/// The remote service that owns form descriptors and stores submissions.
///
/// Both calls return already-narrowed results: a response whose envelope
/// reports failure surfaces as [`ClientError::Rejected`].
#[async_trait]
pub trait FormBackend: Send + Sync {
    async fn fetch_form(&self, case_id: &str, user_id: i64) -> Result<FormDescriptor, ClientError>;

    async fn submit_form(&self, request: &SubmitFormRequest) -> Result<SubmitReceipt, ClientError>;
}
