//! File layering over the embedded defaults

use std::fs;

use deskentry_config::{Loader, OutputFormat};
use tempfile::TempDir;

#[test]
fn user_file_overrides_only_its_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[paths]\ntrailing_slash = false\n").unwrap();

    let config = Loader::new().with_optional_file(&path).build().unwrap();
    assert!(!config.paths.trailing_slash);
    assert_eq!(config.paths.separator, ":");
    assert_eq!(config.output.format, OutputFormat::Plain);
}

#[test]
fn missing_optional_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let config = Loader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .build()
        .unwrap();
    assert_eq!(config.query.section, "Desktop Entry");
}

#[test]
fn missing_required_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = Loader::new().with_file(dir.path().join("absent.toml")).build();
    assert!(result.is_err());
}

#[test]
fn later_layers_win() {
    let dir = TempDir::new().unwrap();
    let user = dir.path().join("user.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&user, "[output]\nformat = \"json\"\n[query]\nlocale = \"system\"\n").unwrap();
    fs::write(&explicit, "[output]\nformat = \"plain\"\n").unwrap();

    let config = Loader::new()
        .with_optional_file(&user)
        .with_file(&explicit)
        .set_override("logging.level", "debug")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.output.format, OutputFormat::Plain);
    assert_eq!(config.query.locale, "system");
    assert_eq!(config.logging.level, "debug");
}
