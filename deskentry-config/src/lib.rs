//! Configuration loader for the deskentry tools.
//!
//! `defaults/deskentry.default.toml` is embedded into the binary, so the documented defaults
//! and the runtime behavior are the same file. Callers layer user files and command line
//! overrides on top through [`Loader`] and deserialize into [`DeskentryConfig`].
//!
//! Layering order, lowest first:
//!
//!     embedded defaults
//!     $XDG_CONFIG_HOME/deskentry/config.toml   (optional)
//!     --config <file>                         (required when given)
//!     command line overrides

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/deskentry.default.toml");

/// Top-level configuration consumed by the deskentry binary.
#[derive(Debug, Clone, Deserialize)]
pub struct DeskentryConfig {
    pub query: QueryConfig,
    pub output: OutputConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

/// Defaults for value lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub section: String,
    /// A locale key as understood by `DesktopEntry::localized_value`
    pub locale: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => f.write_str("plain"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// How `deskentry paths` prints directory lists.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub trailing_slash: bool,
    pub separator: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, used when `RUST_LOG` is unset
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error at build time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `("output.format", "json")`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Like [`Loader::set_override`], skipped when `value` is `None`.
    pub fn set_override_option<I>(self, key: &str, value: Option<I>) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        match value {
            Some(value) => self.set_override(key, value),
            None => Ok(self),
        }
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DeskentryConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DeskentryConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.query.section, "Desktop Entry");
        assert_eq!(config.query.locale, "default");
        assert_eq!(config.output.format, OutputFormat::Plain);
        assert!(config.paths.trailing_slash);
        assert_eq!(config.paths.separator, ":");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn optional_override_skips_none() {
        let config = Loader::new()
            .set_override_option("query.locale", None::<&str>)
            .and_then(|loader| loader.set_override_option("query.section", Some("Desktop Action New")))
            .and_then(Loader::build)
            .expect("config to build");
        assert_eq!(config.query.locale, "default");
        assert_eq!(config.query.section, "Desktop Action New");
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
