//! The kinds of standard locations that can be resolved

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unknown location type '{0}'")]
    UnknownLocation(String),
}

/// A standard location. Not the same set as any toolkit's standard locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardLocation {
    // xdg-user-dirs
    Desktop,
    Download,
    Templates,
    PublicShare,
    Documents,
    Music,
    Pictures,
    Videos,
    // basedir-spec, environment or defaults
    XdgConfigHome,
    XdgConfigDirs,
    XdgDataDirs,
    XdgDataHome,
    XdgCacheHome,
    // KDE Frameworks 5, not part of any freedesktop.org specification
    Kf5Services,
    Kf5Sound,
    Kf5Templates,
}

impl StandardLocation {
    pub const ALL: [StandardLocation; 16] = [
        StandardLocation::Desktop,
        StandardLocation::Download,
        StandardLocation::Templates,
        StandardLocation::PublicShare,
        StandardLocation::Documents,
        StandardLocation::Music,
        StandardLocation::Pictures,
        StandardLocation::Videos,
        StandardLocation::XdgConfigHome,
        StandardLocation::XdgConfigDirs,
        StandardLocation::XdgDataDirs,
        StandardLocation::XdgDataHome,
        StandardLocation::XdgCacheHome,
        StandardLocation::Kf5Services,
        StandardLocation::Kf5Sound,
        StandardLocation::Kf5Templates,
    ];

    /// The name used on the command line and as the `XDG_<NAME>_DIR` key for user dirs.
    pub fn name(self) -> &'static str {
        match self {
            StandardLocation::Desktop => "DESKTOP",
            StandardLocation::Download => "DOWNLOAD",
            StandardLocation::Templates => "TEMPLATES",
            StandardLocation::PublicShare => "PUBLICSHARE",
            StandardLocation::Documents => "DOCUMENTS",
            StandardLocation::Music => "MUSIC",
            StandardLocation::Pictures => "PICTURES",
            StandardLocation::Videos => "VIDEOS",
            StandardLocation::XdgConfigHome => "XDG_CONFIG_HOME",
            StandardLocation::XdgConfigDirs => "XDG_CONFIG_DIRS",
            StandardLocation::XdgDataDirs => "XDG_DATA_DIRS",
            StandardLocation::XdgDataHome => "XDG_DATA_HOME",
            StandardLocation::XdgCacheHome => "XDG_CACHE_HOME",
            StandardLocation::Kf5Services => "KF5_SERVICES",
            StandardLocation::Kf5Sound => "KF5_SOUND",
            StandardLocation::Kf5Templates => "KF5_TEMPLATES",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StandardLocation::Desktop => "User's desktop directory, defined by xdg-user-dirs.",
            StandardLocation::Download => "User's download directory, defined by xdg-user-dirs.",
            StandardLocation::Templates => "User's templates directory, defined by xdg-user-dirs.",
            StandardLocation::PublicShare => "User's public share directory, defined by xdg-user-dirs.",
            StandardLocation::Documents => "User's documents directory, defined by xdg-user-dirs.",
            StandardLocation::Music => "User's music directory, defined by xdg-user-dirs.",
            StandardLocation::Pictures => "User's pictures directory, defined by xdg-user-dirs.",
            StandardLocation::Videos => "User's videos directory, defined by xdg-user-dirs.",
            StandardLocation::XdgConfigHome => {
                "Base directory for user-specific configuration files, defined by basedir-spec."
            }
            StandardLocation::XdgConfigDirs => {
                "Preference ordered base directories to search for configuration files, defined by basedir-spec."
            }
            StandardLocation::XdgDataDirs => {
                "Preference ordered base directories to search for data files, defined by basedir-spec."
            }
            StandardLocation::XdgDataHome => {
                "Base directory for user-specific data files, defined by basedir-spec."
            }
            StandardLocation::XdgCacheHome => {
                "Base directory for user-specific non-essential data, defined by basedir-spec."
            }
            StandardLocation::Kf5Services => "(*) KDE Frameworks 5 services. (kf5-config --path services)",
            StandardLocation::Kf5Sound => "(*) KDE Frameworks 5 application sounds. (kf5-config --path sound)",
            StandardLocation::Kf5Templates => "(*) KDE Frameworks 5 templates. (kf5-config --path templates)",
        }
    }

    /// Whether the location comes from `user-dirs.dirs`.
    pub fn is_user_dir(self) -> bool {
        matches!(
            self,
            StandardLocation::Desktop
                | StandardLocation::Download
                | StandardLocation::Templates
                | StandardLocation::PublicShare
                | StandardLocation::Documents
                | StandardLocation::Music
                | StandardLocation::Pictures
                | StandardLocation::Videos
        )
    }

    /// Directory under `$HOME` used when `user-dirs.dirs` has no entry.
    pub(crate) fn user_dir_fallback(self) -> Option<&'static str> {
        match self {
            StandardLocation::Desktop => Some("Desktop"),
            StandardLocation::Download => Some("Downloads"),
            StandardLocation::Templates => Some(".Templates"),
            StandardLocation::PublicShare => Some(".Public"),
            StandardLocation::Documents => Some("Documents"),
            StandardLocation::Music => Some("Music"),
            StandardLocation::Pictures => Some("Pictures"),
            StandardLocation::Videos => Some("Videos"),
            _ => None,
        }
    }

    /// KDE resource type searched under the data directories.
    pub(crate) fn kf5_resource(self) -> Option<&'static str> {
        match self {
            StandardLocation::Kf5Services => Some("kservices5"),
            StandardLocation::Kf5Sound => Some("sounds"),
            StandardLocation::Kf5Templates => Some("templates"),
            _ => None,
        }
    }
}

impl fmt::Display for StandardLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardLocation {
    type Err = PathError;

    /// Case-insensitive match on [StandardLocation::name].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        StandardLocation::ALL
            .into_iter()
            .find(|location| location.name() == wanted)
            .ok_or_else(|| PathError::UnknownLocation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("desktop", StandardLocation::Desktop)]
    #[case("XDG_DATA_DIRS", StandardLocation::XdgDataDirs)]
    #[case("kf5_sound", StandardLocation::Kf5Sound)]
    #[case(" PublicShare ", StandardLocation::PublicShare)]
    fn test_parse(#[case] input: &str, #[case] expected: StandardLocation) {
        assert_eq!(input.parse::<StandardLocation>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "HOME".parse::<StandardLocation>(),
            Err(PathError::UnknownLocation("HOME".to_string()))
        );
    }

    #[test]
    fn test_names_are_unique_and_round_trip() {
        for location in StandardLocation::ALL {
            assert_eq!(location.name().parse::<StandardLocation>(), Ok(location));
        }
    }

    #[test]
    fn test_user_dirs_have_fallbacks() {
        for location in StandardLocation::ALL {
            assert_eq!(location.is_user_dir(), location.user_dir_fallback().is_some());
        }
    }
}
