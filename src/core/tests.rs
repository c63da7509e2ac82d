use super::cli::CliPaths;
use super::context::AppContext;
use crate::errors::Error;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("dynmenu-core-{name}-{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_paths_defaults() {
    let paths = CliPaths::from_args(std::iter::empty()).unwrap();
    assert_eq!(paths.config_path, PathBuf::from("config.json"));
    assert_eq!(paths.logs_dir, PathBuf::from("logs"));
}

#[test]
fn cli_paths_overrides_all_paths() {
    let args = vec![
        "--config".to_string(),
        "/tmp/cfg.json".to_string(),
        "--logs".to_string(),
        "/tmp/logs".to_string(),
    ];
    let paths = CliPaths::from_args(args.into_iter()).unwrap();
    assert_eq!(paths.config_path, PathBuf::from("/tmp/cfg.json"));
    assert_eq!(paths.logs_dir, PathBuf::from("/tmp/logs"));
}

#[test]
fn cli_paths_errors_on_unknown_flag() {
    let args = vec!["--verbose".to_string()];
    let err = CliPaths::from_args(args.into_iter()).unwrap_err();
    assert!(err.to_string().contains("Unknown argument: --verbose"));
}

#[test]
fn cli_paths_errors_on_missing_value() {
    let args = vec!["--config".to_string()];
    match CliPaths::from_args(args.into_iter()).unwrap_err() {
        Error::Parse(msg) => assert_eq!(msg, "Missing value for --config"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn context_uses_defaults_without_config_file() {
    let dir = temp_dir("defaults");
    let ctx = AppContext::new_with_paths(dir.join("config.json"), dir.join("logs")).unwrap();
    assert_eq!(ctx.config.parent_shortcut(), "..");
    assert!(ctx.logger.file_logging_enabled());
    assert_eq!(ctx.logger.log_dir(), Some(dir.join("logs")));
}

#[test]
fn context_applies_file_logging_setting() {
    let dir = temp_dir("nolog");
    fs::write(
        dir.join("config.json"),
        r#"{ "file_logging_enabled": { "value": "False", "description": "d" } }"#,
    )
    .unwrap();
    let ctx = AppContext::new_with_paths(dir.join("config.json"), dir.join("logs")).unwrap();
    assert!(!ctx.logger.file_logging_enabled());
}

#[test]
fn context_reports_broken_config() {
    let dir = temp_dir("broken");
    fs::write(dir.join("config.json"), "not json").unwrap();
    let err = AppContext::new_with_paths(dir.join("config.json"), dir.join("logs")).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
