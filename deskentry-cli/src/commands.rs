//! Output for each subcommand, kept apart from argument handling so it can be unit tested.

use deskentry_config::{OutputFormat, PathsConfig};
use deskentry_parser::entry::unescape;
use deskentry_parser::DesktopEntry;
use deskentry_paths::{Environment, StandardLocation, StandardPaths};
use serde::Serialize;

/// Options for `deskentry get`.
#[derive(Debug, Clone)]
pub struct GetOptions<'a> {
    pub key: &'a str,
    pub section: &'a str,
    pub locale: &'a str,
    pub raw: bool,
}

/// One line per group, in file order.
pub fn groups(entry: &DesktopEntry) -> String {
    entry
        .all_groups()
        .iter()
        .map(|group| format!("{}\n", group))
        .collect()
}

/// The value for a key, `None` when neither the key nor any locale fallback exists.
pub fn get(entry: &DesktopEntry, options: &GetOptions<'_>) -> Option<String> {
    if !entry.has_group(options.section) {
        tracing::debug!(section = options.section, "no such group");
        return None;
    }
    let value = entry.find_localized_value(options.key, options.locale, options.section)?;
    if options.raw {
        Some(value)
    } else {
        Some(unescape(&value))
    }
}

#[derive(Debug, Serialize)]
struct DumpEntry {
    path: Option<String>,
    status: String,
    #[serde(rename = "type")]
    entry_type: String,
    groups: Vec<DumpGroup>,
}

#[derive(Debug, Serialize)]
struct DumpGroup {
    name: String,
    entries: Vec<DumpPair>,
}

#[derive(Debug, Serialize)]
struct DumpPair {
    key: String,
    value: String,
}

fn collect_groups(entry: &DesktopEntry) -> Vec<DumpGroup> {
    entry
        .all_groups()
        .into_iter()
        .map(|name| {
            let entries = entry
                .keys(&name)
                .into_iter()
                .map(|key| {
                    let value = entry.value(&key, &name, "");
                    DumpPair { key, value }
                })
                .collect();
            DumpGroup { name, entries }
        })
        .collect()
}

/// Every group with its keys, as text close to the file format or as JSON.
pub fn dump(entry: &DesktopEntry, format: OutputFormat) -> Result<String, serde_json::Error> {
    let groups = collect_groups(entry);
    match format {
        OutputFormat::Plain => {
            let blocks: Vec<String> = groups
                .iter()
                .map(|group| {
                    let mut block = format!("[{}]\n", group.name);
                    for pair in &group.entries {
                        block.push_str(&format!("{}={}\n", pair.key, pair.value));
                    }
                    block
                })
                .collect();
            Ok(blocks.join("\n"))
        }
        OutputFormat::Json => {
            let dump = DumpEntry {
                path: entry.path().map(|path| path.display().to_string()),
                status: format!("{:?}", entry.status()),
                entry_type: entry.entry_type().to_string(),
                groups,
            };
            let mut json = serde_json::to_string_pretty(&dump)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Location names with their descriptions, one per line.
pub fn location_types() -> String {
    let mut out = String::new();
    for location in StandardLocation::ALL {
        out.push_str(&format!("{:<16} {}\n", location.name(), location.description()));
    }
    out.push_str("\n(*) Not a freedesktop.org standard.\n");
    out
}

/// Directories for a location type joined by the configured separator. An unknown type
/// gives an empty line.
pub fn locations<E: Environment>(paths: &StandardPaths<E>, name: &str, config: &PathsConfig) -> String {
    let location = match name.parse::<StandardLocation>() {
        Ok(location) => location,
        Err(err) => {
            tracing::debug!(error = %err, "nothing to print");
            return "\n".to_string();
        }
    };

    let dirs: Vec<String> = paths
        .standard_locations(location)
        .iter()
        .map(|dir| {
            let mut dir = dir.display().to_string();
            if config.trailing_slash && !dir.ends_with('/') {
                dir.push('/');
            }
            dir
        })
        .collect();
    format!("{}\n", dirs.join(&config.separator))
}
