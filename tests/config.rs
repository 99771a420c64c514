//! Config file round trips on disk.

use serial_test::serial;
use taskdeck::config::{Config, ConfigError, Profile};
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .profiles
        .push(Profile::new("work", "https://pm.example.com/api"));
    config.settings.default_profile = Some("work".to_string());
    config.settings.request_timeout_secs = Some(15);
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.profiles.len(), 2);
    assert_eq!(loaded.settings.request_timeout_secs, Some(15));
    let profile = loaded.resolve_profile(None).unwrap();
    assert_eq!(profile.name, "work");
    assert_eq!(profile.api_url, "https://pm.example.com/api");
}

#[test]
fn test_missing_file_yields_default_profile() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    let profile = config.resolve_profile(None).unwrap();
    assert_eq!(profile.api_url, "http://localhost:8000/api");
}

#[test]
fn test_invalid_url_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[[profiles]]\nname = \"bad\"\napi_url = \"ftp://example.com\"\n",
    )
    .unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_unknown_profile_is_reported() {
    let config = Config::default();
    let result = config.resolve_profile(Some("nope"));
    assert!(matches!(result, Err(ConfigError::ProfileNotFound(name)) if name == "nope"));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_config_path_follows_xdg_config_home() {
    let dir = TempDir::new().unwrap();
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let path = Config::config_path().unwrap();

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    assert_eq!(path, dir.path().join("taskdeck").join("config.toml"));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_load_uses_default_location() {
    let dir = TempDir::new().unwrap();
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let mut config = Config::default();
    config.settings.tick_rate_ms = 40;
    config.save().unwrap();
    let loaded = Config::load();

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    assert_eq!(loaded.unwrap().settings.tick_rate_ms, 40);
}
