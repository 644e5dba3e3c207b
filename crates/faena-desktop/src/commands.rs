use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, State};

use faena_client::session::{self, SessionStore, session_keys};
use faena_core::models::input::{FieldEvent, FieldInput};
use faena_core::models::issue::ValidationIssue;
use faena_core::models::state::SubmissionState;
use faena_core::models::view::FormView;
use faena_desktop::backends;
use faena_desktop::config::{self, FaenaConfig, UploadTarget};
use faena_engine::FormEngine;

use crate::state::DesktopState;

pub const SUBMISSION_EVENT: &str = "submission-state";

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureRequest {
    pub backend_url: String,
    #[serde(default)]
    pub fetch_path: Option<String>,
    #[serde(default)]
    pub submit_path: Option<String>,
    pub upload: UploadTarget,
    /// Bearer token for the backend. Kept in the session only, never on disk.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResult {
    pub message: Option<String>,
    pub reloaded: bool,
}

async fn require_config(state: &DesktopState) -> Result<FaenaConfig, String> {
    let mut guard = state.config.lock().await;
    if guard.is_none() && config::has_config() {
        *guard = Some(config::load_config().map_err(|e| e.to_string())?);
    }
    guard
        .clone()
        .ok_or_else(|| "not configured: call configure() first".to_string())
}

fn engine_mut(slot: &mut Option<FormEngine>) -> Result<&mut FormEngine, String> {
    slot.as_mut()
        .ok_or_else(|| "no form open: call load_form() first".to_string())
}

/// Relay every submission state change to the front end until the engine is dropped.
fn forward_submission_state(app: AppHandle, engine: &FormEngine) {
    let mut rx = engine.subscribe();
    tauri::async_runtime::spawn(async move {
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            if let Err(e) = app.emit(SUBMISSION_EVENT, &current) {
                tracing::warn!(error = %e, "failed to emit submission state");
            }
        }
    });
}

#[tauri::command]
pub async fn configure(
    state: State<'_, DesktopState>,
    request: ConfigureRequest,
) -> Result<FaenaConfig, String> {
    let mut config = FaenaConfig::new(request.backend_url, request.upload);
    if let Some(path) = request.fetch_path {
        config.fetch_path = path;
    }
    if let Some(path) = request.submit_path {
        config.submit_path = path;
    }
    config::save_config(&config).map_err(|e| e.to_string())?;

    match request.token {
        Some(token) => state.session.set(session_keys::TOKEN, token).await,
        None => {
            state.session.remove(session_keys::TOKEN).await;
        }
    }
    if let Some(user_id) = request.user_id {
        state
            .session
            .set(session_keys::USER_ID, user_id.to_string())
            .await;
    }

    *state.config.lock().await = Some(config.clone());
    Ok(config)
}

#[tauri::command]
pub async fn get_config(state: State<'_, DesktopState>) -> Result<Option<FaenaConfig>, String> {
    match require_config(&state).await {
        Ok(config) => Ok(Some(config)),
        Err(_) if !config::has_config() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Open the form for `case_id`. `user_id` falls back to the session's.
#[tauri::command]
pub async fn load_form(
    app: AppHandle,
    state: State<'_, DesktopState>,
    case_id: String,
    user_id: Option<i64>,
) -> Result<FormView, String> {
    state.progress.ensure_idle().await?;
    let config = require_config(&state).await?;
    let user_id = match user_id {
        Some(id) => id,
        None => session::user_id(state.session.as_ref())
            .await
            .ok_or_else(|| "no user id: pass one or set it with configure()".to_string())?,
    };

    let session: Arc<dyn SessionStore> = state.session.clone();
    let backend = backends::build_backend(&config, session);
    let uploader = backends::build_uploader(&config).await;
    let mut engine = FormEngine::new(backend, uploader);
    forward_submission_state(app, &engine);
    state.progress.track(engine.subscribe()).await;

    let loaded = engine.load(&case_id, user_id).await;
    let mut guard = state.engine.lock().await;
    let engine = guard.insert(engine);
    loaded.map_err(|e| e.to_string())?;
    engine.render().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn retry_load(state: State<'_, DesktopState>) -> Result<FormView, String> {
    state.progress.ensure_idle().await?;
    let mut guard = state.engine.lock().await;
    let engine = engine_mut(&mut guard)?;
    engine.retry_load().await.map_err(|e| e.to_string())?;
    engine.render().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_form(state: State<'_, DesktopState>) -> Result<FormView, String> {
    let mut guard = state.engine.lock().await;
    engine_mut(&mut guard)?.render().map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn handle_field(
    state: State<'_, DesktopState>,
    question_id: String,
    input: FieldInput,
) -> Result<FieldEvent, String> {
    state.progress.ensure_idle().await?;
    let mut guard = state.engine.lock().await;
    engine_mut(&mut guard)?
        .handle(&question_id, input)
        .map_err(|e| e.to_string())
}

/// Attach a picture from disk, for pickers that hand back a path.
#[tauri::command]
pub async fn add_picture_file(
    state: State<'_, DesktopState>,
    question_id: String,
    path: String,
) -> Result<FieldEvent, String> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("failed to read {path}: {e}"))?;
    let file_name = Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());

    state.progress.ensure_idle().await?;
    let mut guard = state.engine.lock().await;
    engine_mut(&mut guard)?
        .handle(&question_id, FieldInput::AddPicture { file_name, bytes })
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn remove_picture(
    state: State<'_, DesktopState>,
    question_id: String,
    index: usize,
) -> Result<FieldEvent, String> {
    state.progress.ensure_idle().await?;
    let mut guard = state.engine.lock().await;
    engine_mut(&mut guard)?
        .handle(&question_id, FieldInput::RemovePicture { index })
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn validate_form(state: State<'_, DesktopState>) -> Result<Vec<ValidationIssue>, String> {
    let mut guard = state.engine.lock().await;
    Ok(engine_mut(&mut guard)?.validation_issues())
}

#[tauri::command]
pub async fn submit_form(state: State<'_, DesktopState>) -> Result<SubmitResult, String> {
    state.progress.ensure_idle().await?;
    let mut guard = state.engine.lock().await;
    let outcome = engine_mut(&mut guard)?
        .submit_form()
        .await
        .map_err(|e| e.to_string())?;
    Ok(SubmitResult {
        message: outcome.message,
        reloaded: outcome.reloaded,
    })
}

/// Answers while a submit is in flight; never waits on the engine.
#[tauri::command]
pub async fn get_submission_state(state: State<'_, DesktopState>) -> Result<SubmissionState, String> {
    Ok(state.progress.current().await)
}

#[tauri::command]
pub async fn reset_form(state: State<'_, DesktopState>) -> Result<FormView, String> {
    state.progress.ensure_idle().await?;
    let mut guard = state.engine.lock().await;
    let engine = engine_mut(&mut guard)?;
    engine.reset();
    engine.render().map_err(|e| e.to_string())
}
