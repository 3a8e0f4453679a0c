//! Desktop entry documents
//!
//!     [DesktopEntry] is the entry point of the crate. Loading never fails: a missing file is
//!     an empty document, an unreadable one is an empty document with
//!     [Status::AccessError], and a malformed header is recorded as
//!     [Status::FormatError] while everything around it is still parsed.
//!
//!     Sections are split out eagerly but parsed lazily. Reads take `&self`; the section map
//!     sits behind a read-write lock so a lookup that has to materialize a section or a value
//!     briefly upgrades to the write lock. Once everything a caller touches is materialized,
//!     concurrent readers only ever share the read lock.
//!
//! Usage
//!
//!     let entry = DesktopEntry::load("/usr/share/applications/fooview.desktop");
//!     let name = entry.localized_value("Name", "default", DEFAULT_SECTION, "");
//!     let groups = entry.all_groups();

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use super::entry_type::EntryType;
use super::error::{EntryError, Result, Status};
use super::escape::split_list;
use super::locale::{candidate_keys, qualified_key};
use super::sections::split_sections;
use super::store::{Peek, Section};
use super::value::ValueType;

/// The group holding the main entry keys.
pub const DEFAULT_SECTION: &str = "Desktop Entry";

/// An in-memory desktop entry file.
#[derive(Debug, Default)]
pub struct DesktopEntry {
    path: Option<PathBuf>,
    status: Status,
    sections: RwLock<IndexMap<String, Section>>,
}

impl DesktopEntry {
    /// Loads the file at `path`, fuzzily.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut entry = DesktopEntry {
            path: Some(path.to_path_buf()),
            ..Default::default()
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "desktop entry file does not exist");
            return entry;
        }

        match std::fs::read(path) {
            Ok(data) => entry.populate(&data),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read desktop entry file");
                entry.record_status(Status::AccessError);
            }
        }
        entry
    }

    /// Parses an in-memory buffer with the same rules as [DesktopEntry::load].
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut entry = DesktopEntry::default();
        entry.populate(data);
        entry
    }

    fn populate(&mut self, data: &[u8]) {
        let split = split_sections(data);
        let format_ok = split.format_ok();

        let sections = self.sections.get_mut().unwrap_or_else(PoisonError::into_inner);
        sections.clear();
        for raw in split.sections {
            let bytes = data[raw.range].to_vec();
            if sections.contains_key(&raw.name) {
                tracing::debug!(section = %raw.name, "duplicate section header, later one wins");
            }
            let section = Section::from_raw(raw.name.clone(), bytes);
            sections.insert(raw.name, section);
        }
        tracing::debug!(sections = sections.len(), format_ok, "loaded desktop entry");

        if !format_ok {
            self.record_status(Status::FormatError);
        }
    }

    /// Records `status`, keeping the first error seen.
    fn record_status(&mut self, status: Status) {
        if self.status == Status::NoError {
            self.status = status;
        }
    }

    /// The load status; the first error recorded wins.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Resets the status to [Status::NoError].
    pub fn clear_status(&mut self) {
        self.status = Status::NoError;
    }

    /// The path this document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read_sections(&self) -> RwLockReadGuard<'_, IndexMap<String, Section>> {
        self.sections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sections(&self) -> RwLockWriteGuard<'_, IndexMap<String, Section>> {
        self.sections.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `peek` under the read lock and falls back to `fetch` under the write lock when
    /// the section still needs materializing. `None` when the section does not exist.
    fn with_section<T>(
        &self,
        section: &str,
        peek: impl FnOnce(&Section) -> Peek<T>,
        fetch: impl FnOnce(&mut Section) -> T,
    ) -> Option<T> {
        {
            let sections = self.read_sections();
            let found = sections.get(section)?;
            if let Peek::Ready(value) = peek(found) {
                return Some(value);
            }
        }
        self.write_sections().get_mut(section).map(fetch)
    }

    /// Group names in the order they first appear.
    pub fn all_groups(&self) -> Vec<String> {
        self.read_sections().keys().cloned().collect()
    }

    pub fn has_group(&self, section: &str) -> bool {
        self.read_sections().contains_key(section)
    }

    /// Keys of `section` in first-definition order; empty if the group does not exist.
    pub fn keys(&self, section: &str) -> Vec<String> {
        self.with_section(section, Section::peek_keys, Section::keys)
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str, section: &str) -> bool {
        self.with_section(section, |s| s.peek_contains(key), |s| s.contains(key))
            .unwrap_or(false)
    }

    /// The typed value of `key`, or `(NotExisted, default)`.
    pub fn typed_value(&self, key: &str, section: &str, default: &str) -> (ValueType, String) {
        if key.is_empty() || section.is_empty() {
            tracing::warn!(key, section, "typed_value: empty key or section passed");
            return (ValueType::NotExisted, default.to_string());
        }
        self.lookup(key, section)
            .unwrap_or_else(|| (ValueType::NotExisted, default.to_string()))
    }

    fn lookup(&self, key: &str, section: &str) -> Option<(ValueType, String)> {
        self.with_section(section, |s| s.peek(key), |s| s.lookup(key))
            .flatten()
    }

    /// The raw value of `key` in `section`, `None` when either is missing.
    pub fn find_value(&self, key: &str, section: &str) -> Option<String> {
        if key.is_empty() || section.is_empty() {
            tracing::warn!(key, section, "value: empty key or section passed");
            return None;
        }
        self.lookup(key, section).map(|(_, value)| value)
    }

    /// The raw value of `key` in `section`, or `default`.
    pub fn value(&self, key: &str, section: &str, default: &str) -> String {
        self.find_value(key, section)
            .unwrap_or_else(|| default.to_string())
    }

    /// The first existing variant of `key` along the locale fallback chain.
    ///
    /// `locale_key` is a locale name or one of `empty`, `default` and `system`. The chain is the
    /// requested variant, then `key[C]`, then the bare `key`.
    pub fn find_localized_value(&self, key: &str, locale_key: &str, section: &str) -> Option<String> {
        if key.is_empty() || section.is_empty() {
            tracing::warn!(key, section, "localized_value: empty key or section passed");
            return None;
        }
        candidate_keys(key, locale_key)
            .iter()
            .find_map(|candidate| self.lookup(candidate, section))
            .map(|(_, value)| value)
    }

    pub fn localized_value(&self, key: &str, locale_key: &str, section: &str, default: &str) -> String {
        self.find_localized_value(key, locale_key, section)
            .unwrap_or_else(|| default.to_string())
    }

    /// Splits a `;` separated value into its items; empty when the key is missing.
    pub fn string_list(&self, key: &str, section: &str) -> Vec<String> {
        self.find_value(key, section)
            .map(|value| split_list(&value))
            .unwrap_or_default()
    }

    /// The `Type` of the main group.
    pub fn entry_type(&self) -> EntryType {
        self.find_value("Type", DEFAULT_SECTION)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Writes `value` under `key`, creating `section` if needed.
    pub fn set_value(&mut self, key: &str, value: &str, section: &str) -> Result<()> {
        check_write_target("set_value", key, section)?;
        self.write(section, key.to_string(), value);
        Ok(())
    }

    /// Writes `value` under `key[locale_key]` (or the bare key when `locale_key` is empty).
    pub fn set_localized_value(
        &mut self,
        key: &str,
        value: &str,
        locale_key: &str,
        section: &str,
    ) -> Result<()> {
        check_write_target("set_localized_value", key, section)?;
        let actual_key = if locale_key.is_empty() {
            key.to_string()
        } else {
            qualified_key(key, locale_key)
        };
        self.write(section, actual_key, value);
        Ok(())
    }

    fn write(&mut self, section: &str, key: String, value: &str) {
        let sections = self.sections.get_mut().unwrap_or_else(PoisonError::into_inner);
        sections
            .entry(section.to_string())
            .or_insert_with(|| Section::new(section))
            .set(key, value);
    }
}

fn check_write_target(operation: &'static str, key: &str, section: &str) -> Result<()> {
    if key.is_empty() {
        tracing::warn!(section, "{operation}: empty key passed");
        return Err(EntryError::EmptyKey(operation));
    }
    if section.is_empty() {
        tracing::warn!(key, "{operation}: empty section passed");
        return Err(EntryError::EmptySection(operation));
    }
    Ok(())
}
