use std::fs;

use docgraft::config::{load_config, ResolverConfig, DEFAULT_MERGE_SEPARATOR};
use docgraft::errors::DocGraftError;
use docgraft::types::InheritStrategy;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = ResolverConfig::default();
    assert!(!config.merge_docstrings);
    assert_eq!(config.merge_separator, "\n\n");
    assert_eq!(config.merge_separator, DEFAULT_MERGE_SEPARATOR);
    assert_eq!(config.strategy(), InheritStrategy::IfNotPresent);
}

#[test]
fn test_merge_strategy_selection() {
    let config = ResolverConfig {
        merge_docstrings: true,
        ..ResolverConfig::default()
    };
    assert_eq!(config.strategy(), InheritStrategy::Merge);
}

#[test]
fn test_load_missing_file_returns_default() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = load_config(&dir.path().join("docgraft.json")).expect("load should succeed");
    assert_eq!(config, ResolverConfig::default());
}

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("docgraft.json");
    fs::write(
        &path,
        r#"{"merge_docstrings": true, "merge_separator": "\n---\n"}"#,
    )
    .expect("failed to write config");

    let config = load_config(&path).expect("load should succeed");
    assert!(config.merge_docstrings);
    assert_eq!(config.merge_separator, "\n---\n");
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("docgraft.json");
    fs::write(&path, r#"{"merge_docstrings": true}"#).expect("failed to write config");

    let config = load_config(&path).expect("load should succeed");
    assert!(config.merge_docstrings);
    assert_eq!(config.merge_separator, DEFAULT_MERGE_SEPARATOR);
}

#[test]
fn test_load_invalid_json_is_config_error() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("docgraft.json");
    fs::write(&path, "not json").expect("failed to write config");

    let err = load_config(&path).unwrap_err();
    assert!(
        matches!(err, DocGraftError::Config { ref message } if message.contains("parse")),
        "unexpected error: {err}"
    );
}

#[test]
fn test_strategy_string_roundtrip() {
    for strategy in [InheritStrategy::IfNotPresent, InheritStrategy::Merge] {
        assert_eq!(InheritStrategy::from_str(strategy.as_str()), Some(strategy));
    }
    assert_eq!(InheritStrategy::from_str("bogus"), None);
    assert_eq!(InheritStrategy::default(), InheritStrategy::IfNotPresent);
}
