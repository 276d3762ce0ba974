use uphcs_cli::config::{CliConfig, load_config, load_or_default, save_config};
use uphcs_core::models::clinic::Clinic;

fn clinic() -> Clinic {
    Clinic {
        id: 3,
        name: "Main Street".to_string(),
    }
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, CliConfig::default());
    assert_eq!(config.base_url, "http://localhost:4353");
    assert!(config.token.is_none());
}

#[test]
fn save_then_load_keeps_session_and_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = CliConfig {
        config_version: 0,
        base_url: "https://uphcs.example.org".to_string(),
        token: Some("a.b.c".to_string()),
        selected_clinic: Some(clinic()),
    };
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, 1, "saves stamp the current version");
    assert_eq!(loaded.token.as_deref(), Some("a.b.c"));
    assert_eq!(loaded.selected_clinic, Some(clinic()));
    assert!(!path.with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_config_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config(&path, &CliConfig::default()).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"token": "old.token.value"}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.base_url, "http://localhost:4353");
    assert_eq!(config.token.as_deref(), Some("old.token.value"));
    assert!(config.selected_clinic.is_none());
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 7, "base_url": "http://localhost:4353"}"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn oversized_config_version_does_not_wrap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 4294967296, "base_url": "http://localhost:4353"}"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(load_config(&path).is_err());
}

#[test]
fn env_override_wins_unless_blank() {
    let config = CliConfig::default();
    assert_eq!(
        config.effective_base_url(Some("https://staging.example.org")),
        "https://staging.example.org"
    );
    assert_eq!(config.effective_base_url(Some("  ")), "http://localhost:4353");
    assert_eq!(config.effective_base_url(None), "http://localhost:4353");
}

#[test]
fn clear_session_drops_token_and_clinic() {
    let mut config = CliConfig {
        token: Some("a.b.c".to_string()),
        selected_clinic: Some(clinic()),
        ..CliConfig::default()
    };
    config.clear_session();
    assert!(config.token.is_none());
    assert!(config.selected_clinic.is_none());
    assert_eq!(config.base_url, "http://localhost:4353");
}
