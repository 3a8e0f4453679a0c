//! Locale handling for localized lookups
//!
//!     Localized keys look like `Name[zh_CN]`. Lookups accept either a literal locale or one
//!     of three symbolic names: `empty` (the bare key), `default` (the process default locale)
//!     and `system` (the locale the environment asks for).
//!
//!     The process default starts out as the system locale and can be overridden at runtime
//!     with [set_default_locale].

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;

/// Name of the POSIX locale, always tried before the bare key.
pub const C_LOCALE: &str = "C";

static DEFAULT_OVERRIDE: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// How a caller asked for a localized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleKey<'a> {
    /// `""`: no requested locale, only the fallbacks are tried
    None,
    /// `"empty"`: the bare key
    Empty,
    /// `"default"`: the process default locale
    Default,
    /// `"system"`: the environment's locale
    System,
    Literal(&'a str),
}

impl<'a> LocaleKey<'a> {
    pub fn parse(key: &'a str) -> Self {
        match key {
            "" => LocaleKey::None,
            "empty" => LocaleKey::Empty,
            "default" => LocaleKey::Default,
            "system" => LocaleKey::System,
            other => LocaleKey::Literal(other),
        }
    }
}

/// Builds `key[locale]`.
pub fn qualified_key(key: &str, locale: &str) -> String {
    format!("{key}[{locale}]")
}

/// The ordered list of keys tried for a localized lookup.
///
/// Requested locale first, then `key[C]`, then the bare key.
pub fn candidate_keys(key: &str, locale_key: &str) -> Vec<String> {
    let mut keys = Vec::with_capacity(3);
    match LocaleKey::parse(locale_key) {
        LocaleKey::None => {}
        LocaleKey::Empty => keys.push(key.to_string()),
        LocaleKey::Default => keys.push(qualified_key(key, &default_locale())),
        LocaleKey::System => keys.push(qualified_key(key, &system_locale())),
        LocaleKey::Literal(locale) => keys.push(qualified_key(key, locale)),
    }
    keys.push(qualified_key(key, C_LOCALE));
    keys.push(key.to_string());
    keys
}

/// Reduces a POSIX locale string (`zh_CN.UTF-8@latin`) to its name (`zh_CN`).
pub fn normalize_locale_name(raw: &str) -> String {
    let name = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "C" | "POSIX" => C_LOCALE.to_string(),
        name => name.to_string(),
    }
}

/// The system locale as chosen by `LC_ALL`, `LC_MESSAGES` and `LANG`, in that order.
pub fn system_locale() -> String {
    system_locale_from(|var| std::env::var(var).ok())
}

/// Same as [system_locale] with an injectable environment.
pub fn system_locale_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let raw = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.is_empty())
        .unwrap_or_default();
    normalize_locale_name(&raw)
}

/// The process default locale: the override if one is set, the system locale otherwise.
pub fn default_locale() -> String {
    let current = DEFAULT_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    current.unwrap_or_else(system_locale)
}

/// Overrides the process default locale; `None` goes back to following the system.
pub fn set_default_locale(locale: Option<&str>) {
    let mut current = DEFAULT_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *current = locale.map(normalize_locale_name);
}
