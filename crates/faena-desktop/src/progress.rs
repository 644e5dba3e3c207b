use tokio::sync::{Mutex, watch};

use faena_core::models::state::SubmissionState;
use faena_engine::EngineError;

/// Submission state of the open form, readable without locking the engine
/// while a submit holds it.
#[derive(Debug, Default)]
pub struct SubmissionProgress {
    rx: Mutex<Option<watch::Receiver<SubmissionState>>>,
}

impl SubmissionProgress {
    /// Follow a newly opened form's engine.
    pub async fn track(&self, rx: watch::Receiver<SubmissionState>) {
        *self.rx.lock().await = Some(rx);
    }

    /// `Idle` when no form was ever opened.
    pub async fn current(&self) -> SubmissionState {
        self.rx
            .lock()
            .await
            .as_ref()
            .map(|rx| rx.borrow().clone())
            .unwrap_or_default()
    }

    /// Fail fast instead of queueing behind an in-flight submit.
    pub async fn ensure_idle(&self) -> Result<(), String> {
        if self.current().await.is_busy() {
            return Err(EngineError::Busy.to_string());
        }
        Ok(())
    }
}
