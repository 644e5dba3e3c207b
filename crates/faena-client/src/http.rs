use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use faena_core::models::descriptor::FormDescriptor;
use faena_core::models::envelope::{Outcome, RawEnvelope};
use faena_core::models::request::{FetchFormRequest, SubmitFormRequest};

use crate::backend::{FormBackend, SubmitReceipt};
use crate::error::ClientError;
use crate::session::{session_keys, SessionStore};

pub const DEFAULT_FETCH_PATH: &str = "/formularios/consulta";
pub const DEFAULT_SUBMIT_PATH: &str = "/formularios/respuesta";

/// [`FormBackend`] over plain JSON POSTs.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    fetch_path: String,
    submit_path: String,
    session: Option<Arc<dyn SessionStore>>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetch_path: DEFAULT_FETCH_PATH.to_string(),
            submit_path: DEFAULT_SUBMIT_PATH.to_string(),
            session: None,
        }
    }

    pub fn with_paths(mut self, fetch_path: impl Into<String>, submit_path: impl Into<String>) -> Self {
        self.fetch_path = fetch_path.into();
        self.submit_path = submit_path.into();
        self
    }

    /// Send `Authorization: Bearer <token>` whenever the session holds one.
    pub fn with_session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_envelope<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawEnvelope, ClientError> {
        let url = self.url(path);
        let mut req = self.client.post(&url).json(body);

        if let Some(session) = &self.session
            && let Some(token) = session.get(session_keys::TOKEN).await
        {
            req = req.bearer_auth(token);
        }

        debug!(url = %url, "posting to backend");
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            // Error pages sometimes still carry an envelope with a usable message.
            let message = serde_json::from_slice::<RawEnvelope>(&bytes)
                .ok()
                .and_then(|e| e.message());
            warn!(url = %url, status = status.as_u16(), "backend returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl FormBackend for HttpBackend {
    async fn fetch_form(&self, case_id: &str, user_id: i64) -> Result<FormDescriptor, ClientError> {
        let request = FetchFormRequest {
            caso: case_id.to_string(),
            id_usuario: user_id,
        };
        let envelope = self.post_envelope(&self.fetch_path, &request).await?;

        match envelope.narrow::<FormDescriptor>()? {
            Outcome::Success { data, .. } => {
                info!(case_id, form_id = data.id, questions = data.form.questions.len(), "form fetched");
                Ok(data)
            }
            Outcome::Failure { message } => Err(ClientError::Rejected { message }),
        }
    }

    async fn submit_form(&self, request: &SubmitFormRequest) -> Result<SubmitReceipt, ClientError> {
        let envelope = self.post_envelope(&self.submit_path, request).await?;

        match envelope.narrow_ack() {
            Outcome::Success { message, .. } => {
                info!(form_id = request.data.id, "form submitted");
                Ok(SubmitReceipt { message })
            }
            Outcome::Failure { message } => Err(ClientError::Rejected { message }),
        }
    }
}
