mod common;

use common::temp_config;
use countries_explorer::config::{Config, ConfigError, ConfigStore, DEFAULT_BASE_URL};
use std::path::Path;
use std::time::Duration;

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
    assert_eq!(config.api.connect_timeout(), Duration::from_secs(5));
    assert_eq!(config.cache.keep_unused_for(), Duration::from_secs(60));
    assert_eq!(config.loading.show_after_ms, 150);
    assert_eq!(config.loading.min_display_ms, 400);
    assert_eq!(config.loading.notice_after_ms, 3000);
    assert_eq!(config.pagination.items_per_page, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("countries-explorer/config.toml"));
}

#[test]
fn test_missing_file_yields_default() {
    let config = Config::load_from(Path::new("/nonexistent/countries-explorer.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "http://localhost:8080"

[pagination]
items_per_page = 24
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:8080");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.pagination.items_per_page, 24);
    assert_eq!(config.loading.min_display_ms, 400);
    assert_eq!(config.cache.keep_unused_for_seconds, 60);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[api\nbase_url = ");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ParseError { path: p, .. } => assert_eq!(p, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_non_http_base_url_fails_validation() {
    let (_dir, path) = temp_config("[api]\nbase_url = \"ftp://example.com\"\n");
    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("must be an http(s) URL"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_zero_page_size_fails_validation() {
    let mut config = Config::default();
    config.pagination.items_per_page = 0;
    let err = config.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Config validation failed: pagination.items_per_page must be greater than zero"
    );
}

#[test]
fn test_notice_before_show_fails_validation() {
    let mut config = Config::default();
    config.loading.notice_after_ms = 100;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("loading.notice_after_ms (100)"));
}

#[test]
fn test_store_update_rejects_invalid_override() {
    let store = ConfigStore::new(Config::default(), "config.toml".into());

    store
        .update(|c| c.api.base_url = "http://127.0.0.1:1".to_string())
        .unwrap();
    assert_eq!(store.get().api.base_url, "http://127.0.0.1:1");

    assert!(store.update(|c| c.api.base_url = "nope".to_string()).is_err());
    assert_eq!(store.get().api.base_url, "http://127.0.0.1:1");
}

#[test]
fn test_store_reload_picks_up_changes() {
    let (_dir, path) = temp_config("[pagination]\nitems_per_page = 6\n");
    let store = ConfigStore::new(Config::load_from(&path).unwrap(), path.clone());
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.get().pagination.items_per_page, 6);

    std::fs::write(&path, "[pagination]\nitems_per_page = 8\n").unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().pagination.items_per_page, 8);

    // A broken file leaves the last good config in place.
    std::fs::write(&path, "[pagination]\nitems_per_page = 0\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().pagination.items_per_page, 8);
}
