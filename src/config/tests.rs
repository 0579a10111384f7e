//! Configuration tests
//!
//! The default config is written to disk on first run, so whatever
//! `to_toml` produces must parse back into the same values.

use super::*;
use crate::components::flow::FlowKind;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env).unwrap();
    assert_eq!(resolved, config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.bind_addr = "0.0.0.0:9000".parse().unwrap();
    config.template_dir = PathBuf::from("/srv/site/templates");
    config.demo.table_rows = 3;
    config.demo.flow_kind = FlowKind::Workflow;
    config.demo.initial_count = -4;
    config.demo.counter_title = Some("Clicks \"so far\"".to_string());
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(Config::resolve(parsed, no_env).unwrap(), config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::resolve(FileConfig::default(), no_env).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8000");
    assert_eq!(config.demo.table_rows, 15);
    assert_eq!(config.demo.flow_kind, FlowKind::Random);
}

#[test]
fn test_file_overrides_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
bind_addr = "127.0.0.1:3000"

[demo]
flow_kind = "decision"
"#,
    )
    .unwrap();

    let config = Config::resolve(file, no_env).unwrap();
    assert_eq!(config.bind_addr.port(), 3000);
    assert_eq!(config.demo.flow_kind, FlowKind::Decision);
    // Untouched keys keep their defaults
    assert_eq!(config.demo.table_rows, 15);
    assert_eq!(config.template_dir, PathBuf::from("templates"));
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
bind_addr = "127.0.0.1:3000"
static_dir = "public"

[demo]
table_rows = 5
flow_kind = "decision"
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("FRAGMENTS_BIND", "127.0.0.1:4000"),
        ("FRAGMENTS_TABLE_ROWS", "40"),
        ("FRAGMENTS_FLOW_KIND", "simple"),
    ]);
    let config = Config::resolve(file, env).unwrap();

    assert_eq!(config.bind_addr.port(), 4000);
    assert_eq!(config.demo.table_rows, 40);
    assert_eq!(config.demo.flow_kind, FlowKind::Simple);
    assert_eq!(config.static_dir, PathBuf::from("public"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Invalid values
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_flow_kind_is_rejected() {
    let file: FileConfig = toml::from_str("[demo]\nflow_kind = \"spiral\"\n").unwrap();
    let err = Config::resolve(file, no_env).unwrap_err();
    assert!(format!("{:#}", err).contains("spiral"));
}

#[test]
fn test_invalid_bind_address() {
    let err = Config::resolve(FileConfig::default(), env_from(&[("FRAGMENTS_BIND", "nope")]))
        .unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn test_invalid_table_rows_env() {
    let env = env_from(&[("FRAGMENTS_TABLE_ROWS", "many")]);
    assert!(Config::resolve(FileConfig::default(), env).is_err());
}

#[test]
fn test_malformed_file_fails_to_parse() {
    let parsed: Result<FileConfig, _> = toml::from_str("[demo]\ntable_rows = \"ten\"\n");
    assert!(parsed.is_err());
}

#[test]
fn test_log_rotation_parsing() {
    assert_eq!("HOURLY".parse::<LogRotation>(), Ok(LogRotation::Hourly));
    assert_eq!("never".parse::<LogRotation>(), Ok(LogRotation::Never));
    for rotation in LogRotation::ALL {
        assert_eq!(rotation.to_string().parse::<LogRotation>(), Ok(rotation));
    }
}

#[test]
fn test_unknown_log_rotation_is_rejected() {
    let file: FileConfig =
        toml::from_str("[logging]\nfile_rotation = \"weekly\"\n").unwrap();
    let err = Config::resolve(file, no_env).unwrap_err();
    assert!(format!("{:#}", err).contains("weekly"));
}

#[test]
fn test_unknown_log_level_is_rejected() {
    let file: FileConfig = toml::from_str("[logging]\nlevel = \"verbose\"\n").unwrap();
    let err = Config::resolve(file, no_env).unwrap_err();
    assert!(err.to_string().contains("verbose"));
}

#[test]
fn test_log_level_is_normalized() {
    let file: FileConfig = toml::from_str("[logging]\nlevel = \"DEBUG\"\n").unwrap();
    assert_eq!(Config::resolve(file, no_env).unwrap().logging.level, "debug");
}
