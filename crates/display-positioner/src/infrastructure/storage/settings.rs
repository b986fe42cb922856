//! Optional TOML settings for the `display-positioner` binary.
//!
//! Read from `display.positioner.toml` in the data directory.  The file is
//! optional; every field falls back to its default when absent:
//!
//! ```toml
//! max_displays = 16
//! log_level = "warn"
//! ```
//!
//! Command-line options override whatever is loaded here.

use std::path::{Path, PathBuf};

use positioner_core::DEFAULT_MAX_DISPLAYS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::paths::{settings_file_path, NoDataDir};

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform data directory could not be determined.
    #[error(transparent)]
    NoDataDir(#[from] NoDataDir),

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The TOML parsed but holds a value outside its allowed range.
    #[error("invalid settings {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Rejects a display limit of zero, which would refuse every config set.
///
/// # Errors
///
/// Returns [`SettingsError::Invalid`] naming `path` when `max_displays` is 0.
pub fn validate_max_displays(path: &Path, max_displays: usize) -> Result<(), SettingsError> {
    if max_displays == 0 {
        return Err(SettingsError::Invalid {
            path: path.to_path_buf(),
            reason: "max_displays must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Positioner settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionerSettings {
    /// Upper bound on the number of displays in either set.
    #[serde(default = "default_max_displays")]
    pub max_displays: usize,
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_displays() -> usize {
    DEFAULT_MAX_DISPLAYS
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PositionerSettings {
    fn default() -> Self {
        Self {
            max_displays: default_max_displays(),
            log_level: default_log_level(),
        }
    }
}

/// Loads settings from the default location, returning
/// `PositionerSettings::default()` if the file does not yet exist.
///
/// # Errors
///
/// Returns [`SettingsError::NoDataDir`] when the data directory is unknown,
/// [`SettingsError::Io`] for file-system errors other than "not found",
/// [`SettingsError::Parse`] if the TOML is malformed, and
/// [`SettingsError::Invalid`] if `max_displays` is 0.
pub fn load_settings() -> Result<PositionerSettings, SettingsError> {
    load_settings_from(&settings_file_path()?)
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`], [`SettingsError::Parse`] or
/// [`SettingsError::Invalid`].
pub fn load_settings_from(path: &Path) -> Result<PositionerSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let settings: PositionerSettings =
                toml::from_str(&content).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            validate_max_displays(path, settings.max_displays)?;
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PositionerSettings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_allow_sixteen_displays_and_log_warnings() {
        let settings = PositionerSettings::default();
        assert_eq!(settings.max_displays, 16);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        // Arrange
        let dir = tempfile::tempdir().expect("tempdir");

        // Act
        let settings = load_settings_from(&dir.path().join("absent.toml")).expect("load");

        // Assert
        assert_eq!(settings, PositionerSettings::default());
    }

    #[test]
    fn test_partial_settings_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("display.positioner.toml");
        std::fs::write(&path, "max_displays = 4\n").expect("seed");

        let settings = load_settings_from(&path).expect("load");

        assert_eq!(settings.max_displays, 4);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_malformed_settings_file_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("display.positioner.toml");
        std::fs::write(&path, "max_displays = \"many\"\n").expect("seed");

        let result = load_settings_from(&path);

        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_zero_max_displays_is_invalid() {
        // Arrange
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("display.positioner.toml");
        std::fs::write(&path, "max_displays = 0\n").expect("seed");

        // Act
        let result = load_settings_from(&path);

        // Assert
        assert!(matches!(result, Err(SettingsError::Invalid { .. })));
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let settings = PositionerSettings {
            max_displays: 8,
            log_level: "debug".to_string(),
        };

        let text = toml::to_string_pretty(&settings).expect("serialize");
        let restored: PositionerSettings = toml::from_str(&text).expect("deserialize");

        assert_eq!(restored, settings);
    }
}
