use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use faena_client::http::{DEFAULT_FETCH_PATH, DEFAULT_SUBMIT_PATH};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaenaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub backend_url: String,
    /// Added in v1; v0 configs always used the default routes.
    pub fetch_path: String,
    pub submit_path: String,
    pub upload: UploadTarget,
    pub created_at: jiff::Timestamp,
}

/// Where picture attachments go before the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UploadTarget {
    /// Multipart POST; the endpoint answers `{ "url": ... }`.
    Http { endpoint: String },
    S3 { bucket: String, region: String },
}

impl FaenaConfig {
    pub fn new(backend_url: impl Into<String>, upload: UploadTarget) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            backend_url: backend_url.into(),
            fetch_path: DEFAULT_FETCH_PATH.to_string(),
            submit_path: DEFAULT_SUBMIT_PATH.to_string(),
            upload,
            created_at: jiff::Timestamp::now(),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.faena.desktop"))
}

pub fn has_config() -> bool {
    config_dir()
        .map(|d| d.join("config.json").exists())
        .unwrap_or(false)
}

pub fn load_config() -> eyre::Result<FaenaConfig> {
    load_config_from(&config_dir()?.join("config.json"))
}

pub fn load_config_from(path: &Path) -> eyre::Result<FaenaConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Raw JSON first so migrations run before the typed parse.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: FaenaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Faena."
        ));
    }

    // v0 -> v1: backend routes became configurable
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("fetch_path")
            .or_insert(serde_json::Value::String(DEFAULT_FETCH_PATH.to_string()));
        obj.entry("submit_path")
            .or_insert(serde_json::Value::String(DEFAULT_SUBMIT_PATH.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 -> v1 (added fetch_path, submit_path)");
    }

    Ok(json)
}

pub fn save_config(config: &FaenaConfig) -> eyre::Result<()> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &FaenaConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
