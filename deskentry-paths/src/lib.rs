//! # deskentry-paths
//!
//! Resolution of the commonly used XDG directories.
//!
//! Everything here is an environment variable lookup with a documented fallback:
//!
//!     XDG_CONFIG_HOME   $HOME/.config
//!     XDG_CACHE_HOME    $HOME/.cache
//!     XDG_DATA_HOME     $HOME/.local/share
//!     XDG_CONFIG_DIRS   /etc/xdg
//!     XDG_DATA_DIRS     /usr/local/share:/usr/share
//!
//! User directories (desktop, downloads, ...) come from `$XDG_CONFIG_HOME/user-dirs.dirs` as
//! written by xdg-user-dirs, falling back to the usual names under `$HOME`. A user directory
//! set to `$HOME` itself is how xdg-user-dirs disables it, and is returned as is.
//!
//! KDE Frameworks 5 resource directories are approximated from the data directories. KDE
//! derives them partly from build-time install prefixes, so results may differ from
//! `kf5-config --path <type>`.
//!
//! All returned paths are without a trailing slash.

pub mod location;

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

pub use location::{PathError, StandardLocation};

static USER_DIR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^XDG_(.*)_DIR=(.*)$").unwrap());

/// Source of environment variables and filesystem facts.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Resolver for standard locations over some [Environment].
#[derive(Debug, Clone, Default)]
pub struct StandardPaths<E = SystemEnvironment> {
    env: E,
}

impl StandardPaths<SystemEnvironment> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Environment> StandardPaths<E> {
    pub fn with_environment(env: E) -> Self {
        Self { env }
    }

    /// Non-empty value of an environment variable.
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.env.var(name).filter(|value| !value.is_empty())
    }

    /// `$HOME`, or `/` when it is not set.
    pub fn home_dir(&self) -> PathBuf {
        self.non_empty_var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    fn var_or_home(&self, name: &str, fallback: &str) -> PathBuf {
        self.non_empty_var(name)
            .map(PathBuf::from)
            .unwrap_or_else(|| self.home_dir().join(fallback))
    }

    pub fn config_home(&self) -> PathBuf {
        self.var_or_home("XDG_CONFIG_HOME", ".config")
    }

    pub fn cache_home(&self) -> PathBuf {
        self.var_or_home("XDG_CACHE_HOME", ".cache")
    }

    pub fn data_home(&self) -> PathBuf {
        self.var_or_home("XDG_DATA_HOME", ".local/share")
    }

    pub fn config_dirs(&self) -> Vec<PathBuf> {
        match self.non_empty_var("XDG_CONFIG_DIRS") {
            Some(dirs) => dirs.split(':').map(PathBuf::from).collect(),
            None => vec![PathBuf::from("/etc/xdg")],
        }
    }

    /// Data directories in preference order. Relative entries are dropped, the rest are
    /// cleaned and de-duplicated keeping the first occurrence.
    pub fn data_dirs(&self) -> Vec<PathBuf> {
        let Some(dirs) = self.non_empty_var("XDG_DATA_DIRS") else {
            return vec![
                PathBuf::from("/usr/local/share"),
                PathBuf::from("/usr/share"),
            ];
        };

        let mut result: Vec<PathBuf> = Vec::new();
        for dir in dirs.split(':').filter(|dir| dir.starts_with('/')) {
            let cleaned = clean_path(dir);
            if !result.contains(&cleaned) {
                result.push(cleaned);
            }
        }
        result
    }

    /// The directory configured for a user-dirs location, `None` for other kinds.
    pub fn user_dir(&self, location: StandardLocation) -> Option<PathBuf> {
        let fallback = location.user_dir_fallback()?;

        let file = self.config_home().join("user-dirs.dirs");
        match self.env.read_to_string(&file) {
            Some(contents) => {
                if let Some(path) = self.user_dir_from(&contents, location.name()) {
                    return Some(path);
                }
            }
            None => {
                tracing::warn!(file = %file.display(), "user-dirs.dirs can't be read, using fallback");
            }
        }

        Some(self.home_dir().join(fallback))
    }

    /// Looks `XDG_<name>_DIR` up in the contents of a `user-dirs.dirs` file.
    fn user_dir_from(&self, contents: &str, name: &str) -> Option<PathBuf> {
        let value = contents
            .lines()
            .filter_map(|line| USER_DIR_LINE.captures(line))
            .filter(|captures| &captures[1] == name)
            .map(|captures| captures[2].to_string())
            .last()?;

        let mut value = value.as_str();
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = &value[1..value.len() - 1];
        }
        if value.is_empty() {
            return None;
        }

        let mut path = match value.strip_prefix("$HOME") {
            Some(rest) => format!("{}{}", self.home_dir().display(), rest),
            None => value.to_string(),
        };
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
        Some(PathBuf::from(path))
    }

    /// KDE resource directories: data home always, then each data dir that exists.
    pub fn kf5_resource_dirs(&self, resource: &str) -> Vec<PathBuf> {
        if resource.is_empty() {
            return Vec::new();
        }

        let home = self.data_home().join(resource);
        let others = self
            .data_dirs()
            .into_iter()
            .map(|dir| dir.join(resource))
            .filter(|path| self.env.is_dir(path));
        std::iter::once(home).chain(others).collect()
    }

    pub fn standard_locations(&self, location: StandardLocation) -> Vec<PathBuf> {
        match location {
            StandardLocation::XdgConfigHome => vec![self.config_home()],
            StandardLocation::XdgConfigDirs => self.config_dirs(),
            StandardLocation::XdgDataDirs => self.data_dirs(),
            StandardLocation::XdgDataHome => vec![self.data_home()],
            StandardLocation::XdgCacheHome => vec![self.cache_home()],
            StandardLocation::Kf5Services
            | StandardLocation::Kf5Sound
            | StandardLocation::Kf5Templates => location
                .kf5_resource()
                .map(|resource| self.kf5_resource_dirs(resource))
                .unwrap_or_default(),
            user_dir => self.user_dir(user_dir).into_iter().collect(),
        }
    }
}

/// Standard locations for the current process environment.
pub fn standard_locations(location: StandardLocation) -> Vec<PathBuf> {
    StandardPaths::new().standard_locations(location)
}

/// Lexically normalizes an absolute path: repeated separators and `.` disappear, `..` pops.
pub fn clean_path(path: &str) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if cleaned.parent().is_some() {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
