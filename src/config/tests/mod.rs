//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used)]

use crate::{
    MprisRemoteError,
    config::{Config, ConfigPaths, LogLevel},
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Warn);
    assert_eq!(
        config.discovery.candidates,
        vec!["audacious", "vlc", "bmp", "xmms2"]
    );
    assert!(config.notifications.enabled);
    assert_eq!(config.notifications.timeout_ms, -1);
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[discovery]"));
    assert!(toml_str.contains("[notifications]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [discovery]
        candidates = ["spotify", "vlc"]

        [notifications]
        enabled = false
        timeout_ms = 2500
    "#;

    let config = Config::parse(toml_str, None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.discovery.candidates, vec!["spotify", "vlc"]);
    assert!(!config.notifications.enabled);
    assert_eq!(config.notifications.timeout_ms, 2500);
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized = Config::parse(&toml_str, None).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::parse(
        r#"
        [notifications]
        timeout_ms = 1000
        "#,
        None,
    )
    .unwrap();

    assert!(config.notifications.enabled);
    assert_eq!(config.discovery, Default::default());
}

#[test]
fn config_empty_toml() {
    assert_eq!(Config::parse("", None).unwrap(), Config::default());
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [general
        invalid syntax here
    "#;

    let err = Config::parse(invalid_toml, None).unwrap_err();

    assert!(matches!(
        err,
        MprisRemoteError::TomlParseError { ref location, .. } if location == "string"
    ));
}

#[test]
fn config_invalid_log_level() {
    let result = Config::parse("[general]\nlog_level = \"loud\"", None);

    assert!(result.is_err());
}

#[test]
fn config_unknown_fields() {
    let toml_with_unknown = r#"
        [general]
        log_level = "info"
        unknown_field = "should be ignored"

        [unknown_section]
        some_field = "ignored"
    "#;

    let config = Config::parse(toml_with_unknown, None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn config_paths_valid() {
    if std::env::var("HOME").is_ok() || std::env::var("XDG_CONFIG_HOME").is_ok() {
        let main_path = ConfigPaths::main_config().unwrap();

        assert!(main_path.ends_with("mpris-remote/config.toml"));
    }
}

#[test]
fn schema_describes_every_section() {
    let schema = Config::schema_json().unwrap();

    assert!(schema.contains("discovery"));
    assert!(schema.contains("candidates"));
    assert!(schema.contains("timeout_ms"));
}
