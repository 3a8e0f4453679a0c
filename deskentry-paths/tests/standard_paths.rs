//! Resolution against a controlled environment

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use deskentry_paths::{Environment, StandardLocation, StandardPaths};
use rstest::rstest;
use tempfile::TempDir;

/// Variables from a map, filesystem from the real disk.
#[derive(Default)]
struct FakeEnv {
    vars: HashMap<String, String>,
}

impl FakeEnv {
    fn with(mut self, name: &str, value: impl AsRef<str>) -> Self {
        self.vars.insert(name.to_string(), value.as_ref().to_string());
        self
    }
}

impl Environment for FakeEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

fn paths(env: FakeEnv) -> StandardPaths<FakeEnv> {
    StandardPaths::with_environment(env)
}

#[test]
fn test_base_dirs_fall_back_to_home() {
    let p = paths(FakeEnv::default().with("HOME", "/home/u"));
    assert_eq!(p.config_home(), PathBuf::from("/home/u/.config"));
    assert_eq!(p.cache_home(), PathBuf::from("/home/u/.cache"));
    assert_eq!(p.data_home(), PathBuf::from("/home/u/.local/share"));
    assert_eq!(p.config_dirs(), vec![PathBuf::from("/etc/xdg")]);
    assert_eq!(
        p.data_dirs(),
        vec![PathBuf::from("/usr/local/share"), PathBuf::from("/usr/share")]
    );
}

#[test]
fn test_missing_home_uses_root() {
    let p = paths(FakeEnv::default());
    assert_eq!(p.home_dir(), PathBuf::from("/"));
    assert_eq!(p.cache_home(), PathBuf::from("/.cache"));
}

#[test]
fn test_environment_overrides() {
    let p = paths(
        FakeEnv::default()
            .with("HOME", "/home/u")
            .with("XDG_CONFIG_HOME", "/cfg")
            .with("XDG_CONFIG_DIRS", "/a:/b"),
    );
    assert_eq!(p.config_home(), PathBuf::from("/cfg"));
    assert_eq!(p.config_dirs(), vec![PathBuf::from("/a"), PathBuf::from("/b")]);
}

#[test]
fn test_empty_variable_counts_as_unset() {
    let p = paths(FakeEnv::default().with("HOME", "/h").with("XDG_DATA_HOME", ""));
    assert_eq!(p.data_home(), PathBuf::from("/h/.local/share"));
}

#[rstest]
#[case("/usr/share:relative/dir:/usr//share/:/opt/./share", vec!["/usr/share", "/opt/share"])]
#[case("/a/../b:/b", vec!["/b"])]
fn test_data_dirs_are_cleaned(#[case] value: &str, #[case] expected: Vec<&str>) {
    let p = paths(FakeEnv::default().with("XDG_DATA_DIRS", value));
    let expected: Vec<PathBuf> = expected.into_iter().map(PathBuf::from).collect();
    assert_eq!(p.data_dirs(), expected);
}

fn write_user_dirs(config: &Path, contents: &str) {
    fs::write(config.join("user-dirs.dirs"), contents).unwrap();
}

#[test]
fn test_user_dirs_file() {
    let config = TempDir::new().unwrap();
    write_user_dirs(
        config.path(),
        "# written by xdg-user-dirs-update\n\
         XDG_DESKTOP_DIR=\"$HOME/Schreibtisch\"\n\
         XDG_DOWNLOAD_DIR=\"/srv/downloads/\"\n\
         XDG_MUSIC_DIR=\"$HOME/\"\n",
    );
    let p = paths(
        FakeEnv::default()
            .with("HOME", "/home/u")
            .with("XDG_CONFIG_HOME", config.path().to_string_lossy()),
    );

    assert_eq!(
        p.user_dir(StandardLocation::Desktop),
        Some(PathBuf::from("/home/u/Schreibtisch"))
    );
    assert_eq!(
        p.user_dir(StandardLocation::Download),
        Some(PathBuf::from("/srv/downloads"))
    );
    assert_eq!(p.user_dir(StandardLocation::Music), Some(PathBuf::from("/home/u")));
    assert_eq!(
        p.user_dir(StandardLocation::Videos),
        Some(PathBuf::from("/home/u/Videos"))
    );
}

#[test]
fn test_user_dirs_without_file_use_fallbacks() {
    let config = TempDir::new().unwrap();
    let p = paths(
        FakeEnv::default()
            .with("HOME", "/home/u")
            .with("XDG_CONFIG_HOME", config.path().to_string_lossy()),
    );
    assert_eq!(
        p.standard_locations(StandardLocation::Templates),
        vec![PathBuf::from("/home/u/.Templates")]
    );
    assert_eq!(
        p.standard_locations(StandardLocation::PublicShare),
        vec![PathBuf::from("/home/u/.Public")]
    );
    assert_eq!(p.user_dir(StandardLocation::XdgCacheHome), None);
}

#[test]
fn test_kf5_dirs_keep_home_and_existing_only() {
    let data_home = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    let missing = TempDir::new().unwrap();
    fs::create_dir(system.path().join("sounds")).unwrap();

    let p = paths(
        FakeEnv::default()
            .with("XDG_DATA_HOME", data_home.path().to_string_lossy())
            .with(
                "XDG_DATA_DIRS",
                format!("{}:{}", missing.path().display(), system.path().display()),
            ),
    );
    assert_eq!(
        p.standard_locations(StandardLocation::Kf5Sound),
        vec![data_home.path().join("sounds"), system.path().join("sounds")]
    );
    assert_eq!(
        p.standard_locations(StandardLocation::Kf5Services),
        vec![data_home.path().join("kservices5")]
    );
}

#[test]
fn test_no_trailing_slashes() {
    let p = paths(
        FakeEnv::default()
            .with("HOME", "/home/u")
            .with("XDG_DATA_DIRS", "/usr/share/:/opt/"),
    );
    for dir in p.standard_locations(StandardLocation::XdgDataDirs) {
        assert!(!dir.to_string_lossy().ends_with('/'), "{}", dir.display());
    }
}
