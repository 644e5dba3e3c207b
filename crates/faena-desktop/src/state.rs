use std::sync::Arc;

use tokio::sync::Mutex;

use faena_client::session::MemorySessionStore;
use faena_engine::FormEngine;

use faena_desktop::config::FaenaConfig;
use faena_desktop::progress::SubmissionProgress;

pub struct DesktopState {
    pub config: Arc<Mutex<Option<FaenaConfig>>>,
    pub session: Arc<MemorySessionStore>,
    /// The form on screen. Replaced on every `load_form`.
    pub engine: Arc<Mutex<Option<FormEngine>>>,
    /// Read by commands that must not wait on the engine lock.
    pub progress: Arc<SubmissionProgress>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            session: Arc::new(MemorySessionStore::new()),
            engine: Arc::new(Mutex::new(None)),
            progress: Arc::new(SubmissionProgress::default()),
        }
    }
}
