//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::LogLevel;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_newsdesk_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        newsdesk_common::ConfigError::FileNotFound(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[webview]
pool_size = 5

[cache]
default_ttl_secs = 60
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.webview.pool_size, 5);
    assert_eq!(config.cache.default_ttl_secs, 60);
    // Defaults preserved
    assert_eq!(config.webview.idle_timeout_secs, 300);
    assert_eq!(config.cache.category, "html");
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, newsdesk_common::ConfigError::ParseError(_)));
}

#[test]
fn out_of_range_values_are_loaded_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[webview]\npool_size = 99\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.webview.pool_size, 99);
}

#[test]
fn default_template_parses_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.webview.pool_size, 3);
    assert_eq!(config.cache.default_ttl_secs, 3600);
}

#[test]
fn log_level_parses_uppercase() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"DEBUG\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.level.as_filter(), "debug");
}

#[test]
fn default_config_path_ends_with_config_toml() {
    let path = default_config_path().unwrap();
    assert!(path.ends_with("newsdesk/config.toml"));
}
