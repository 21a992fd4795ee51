// Configuration module tests

use std::io::Write;

use image_proxy_url::config::{Config, ConfigError, LogFormat};
use image_proxy_url::constants::DEFAULT_BASE_URL;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_can_load_config_from_file() {
    let file = write_config(
        r#"
proxy:
  base_url: "https://img.example/"
  encode_image_url: false
logging:
  level: debug
  format: json
"#,
    );
    let config = Config::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config.proxy.base_url, "https://img.example/");
    assert!(!config.proxy.encode_image_url);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::load_or_default(dir.path().join("missing.yaml")).unwrap();
    assert_eq!(config.proxy.base_url, DEFAULT_BASE_URL);
    assert!(config.proxy.encode_image_url);
}

#[test]
fn test_load_or_default_validates() {
    let file = write_config("proxy:\n  base_url: ftp://img.example\n");
    let err = Config::load_or_default(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_from_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = Config::from_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
