use rigmon::core::config::{Config, DEFAULT_REQUEST_TIMEOUT_MS};
use rigmon::core::telemetry::{DEFAULT_BASE_URL, DEFAULT_REFRESH_MS};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.refresh_ms, DEFAULT_REFRESH_MS);
    assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rigmon").join("config.json");

    let mut config = Config::default();
    config.set_base_url("http://192.168.1.20:5000/").unwrap();
    config.set_refresh_ms(2000).unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.base_url, "http://192.168.1.20:5000");
}

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_corrupted_config_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"refresh_ms": 500}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.refresh_ms, 500);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut config = Config::default();
    assert!(config.set_base_url("file:///etc/passwd").is_err());
    assert!(config.set_request_timeout_ms(10).is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn test_zero_intervals_on_disk_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"base_url": "http://rig.local:5000", "refresh_ms": 0, "request_timeout_ms": 0}"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.base_url, "http://rig.local:5000");
    assert_eq!(config.refresh_ms, DEFAULT_REFRESH_MS);
    assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    assert!(!config.refresh_interval().is_zero());
}

#[test]
fn test_bad_base_url_on_disk_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"base_url": "ftp://rig.local", "refresh_ms": 500}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.refresh_ms, 500);
}
