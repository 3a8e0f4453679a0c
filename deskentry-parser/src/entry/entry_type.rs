//! The `Type` key of the `[Desktop Entry]` group

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What a desktop entry file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum EntryType {
    /// Missing or unrecognized `Type`; the file may be invalid
    #[default]
    Unknown,
    Application,
    Link,
    Directory,
    /// KDE specific, listed by the freedesktop.org specification
    ServiceType,
    /// KDE specific, listed by the freedesktop.org specification
    Service,
    /// KDE specific, listed by the freedesktop.org specification
    FSDevice,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized desktop entry type '{0}'")]
pub struct EntryTypeError(pub String);

impl FromStr for EntryType {
    type Err = EntryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Application" => Ok(EntryType::Application),
            "Link" => Ok(EntryType::Link),
            "Directory" => Ok(EntryType::Directory),
            "ServiceType" => Ok(EntryType::ServiceType),
            "Service" => Ok(EntryType::Service),
            "FSDevice" => Ok(EntryType::FSDevice),
            other => Err(EntryTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryType::Unknown => "Unknown",
            EntryType::Application => "Application",
            EntryType::Link => "Link",
            EntryType::Directory => "Directory",
            EntryType::ServiceType => "ServiceType",
            EntryType::Service => "Service",
            EntryType::FSDevice => "FSDevice",
        };
        f.write_str(name)
    }
}
