use std::fs;
use tempfile::tempdir;

use crate::config::model::*;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.processing.max_threads, 0);
    assert!(config.processing.ordered_merge);
    assert_eq!(config.io.file_extensions, vec!["txt"]);
    assert_eq!(config.io.report_file_name, "results.txt");
    assert!(config.dedup.case_sensitive_identities);
    assert_eq!(config.logging.verbosity, "normal");
    assert!(!config.notify.enabled);
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.logging.verbosity = "chatty".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.io.file_extensions.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.io.file_extensions = vec![".txt".to_string()];
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.processing.max_threads = 10_000;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.io.report_file_name = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.notify.attachment_name = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_json_uses_section_defaults() {
    let config: Config = serde_json::from_str(
        r#"{ "processing": { "max_threads": 2 }, "dedup": { "case_sensitive_identities": false } }"#,
    )
    .unwrap();

    assert_eq!(config.processing.max_threads, 2);
    assert!(config.processing.ordered_merge);
    assert!(!config.dedup.case_sensitive_identities);
    assert_eq!(config.io.output_directory, "output");
    assert_eq!(config.notify.attachment_name, "Results.txt");
}

#[tokio::test]
async fn test_load_from_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{
            "processing": { "max_threads": 4, "ordered_merge": false },
            "io": { "output_directory": "out", "report_file_name": "sorted.txt", "file_extensions": ["txt", "log"] },
            "logging": { "verbosity": "verbose" },
            "notify": { "enabled": true, "outbox_directory": "box", "attachment_name": "Report.txt" }
        }"#,
    )
    .unwrap();

    let config = Config::load(&config_path).await.unwrap();
    assert_eq!(config.processing.max_threads, 4);
    assert!(!config.processing.ordered_merge);
    assert_eq!(config.io.file_extensions, vec!["txt", "log"]);
    assert_eq!(config.logging.verbosity, "verbose");
    assert!(config.notify.enabled);
    assert_eq!(config.outbox_directory().to_string_lossy(), "box");
}

#[tokio::test]
async fn test_load_rejects_invalid_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, r#"{ "logging": { "verbosity": "loud" } }"#).unwrap();

    assert!(Config::load(&config_path).await.is_err());
}

#[tokio::test]
async fn test_load_or_default_without_file() {
    let temp_dir = tempdir().unwrap();
    let config = Config::load_or_default(temp_dir.path().join("missing.json")).await.unwrap();

    assert_eq!(config.io.report_file_name, "results.txt");
}
