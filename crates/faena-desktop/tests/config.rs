use serde_json::json;

use faena_client::http::{DEFAULT_FETCH_PATH, DEFAULT_SUBMIT_PATH};
use faena_desktop::config::{
    CURRENT_VERSION, FaenaConfig, UploadTarget, load_config_from, migrate, save_config_to,
};

#[test]
fn v0_config_gets_default_routes() {
    let v0 = json!({
        "backend_url": "https://api.faena.test",
        "upload": { "type": "http", "endpoint": "https://files.faena.test/upload" },
        "created_at": "2026-05-01T12:00:00Z"
    });

    let migrated = migrate(v0, 0).expect("migrate");

    assert_eq!(migrated["config_version"], 1);
    assert_eq!(migrated["fetch_path"], DEFAULT_FETCH_PATH);
    assert_eq!(migrated["submit_path"], DEFAULT_SUBMIT_PATH);
    let config: FaenaConfig = serde_json::from_value(migrated).expect("typed");
    assert_eq!(
        config.upload,
        UploadTarget::Http {
            endpoint: "https://files.faena.test/upload".to_string()
        }
    );
}

#[test]
fn migration_keeps_existing_routes() {
    let v0 = json!({ "fetch_path": "/custom/get" });
    let migrated = migrate(v0, 0).expect("migrate");
    assert_eq!(migrated["fetch_path"], "/custom/get");
}

#[test]
fn newer_versions_are_refused() {
    let err = migrate(json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = FaenaConfig::new(
        "https://api.faena.test",
        UploadTarget::S3 {
            bucket: "faena-fotos".to_string(),
            region: "sa-east-1".to_string(),
        },
    );

    save_config_to(dir.path(), &config).expect("save");
    let loaded = load_config_from(&dir.path().join("config.json")).expect("load");

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(dir.path().join("config.json"))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn unversioned_file_on_disk_is_migrated_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "backend_url": "https://api.faena.test",
            "upload": { "type": "s3", "bucket": "b", "region": "us-east-1" },
            "created_at": "2026-05-01T12:00:00Z"
        }"#,
    )
    .expect("write");

    let config = load_config_from(&path).expect("load");

    assert_eq!(config.config_version, 1);
    assert_eq!(config.submit_path, DEFAULT_SUBMIT_PATH);
}
