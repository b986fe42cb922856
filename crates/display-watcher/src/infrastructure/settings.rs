//! Optional TOML settings for the `display-watcher` binary.
//!
//! Read from `display.watcher.toml` in the data directory, or from the path
//! given with `--settings`.  Every field falls back to its default:
//!
//! ```toml
//! max_reboots = 3
//! reboot_command = ["shutdown", "-r", "now"]
//! history_file = "/tmp/displaywatcher.history"
//! log_level = "info"
//! # config_file = "/path/to/display.positioner.config"
//! max_displays = 16
//! ```

use std::path::{Path, PathBuf};

use display_positioner::infrastructure::storage::paths;
use display_positioner::infrastructure::storage::settings::{validate_max_displays, SettingsError};
use positioner_core::DEFAULT_MAX_DISPLAYS;
use serde::{Deserialize, Serialize};

/// Watcher settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatcherSettings {
    /// Consecutive reboots attempted before giving up.
    #[serde(default = "default_max_reboots")]
    pub max_reboots: u32,
    /// Program and arguments that reboot the machine.
    #[serde(default = "default_reboot_command")]
    pub reboot_command: Vec<String>,
    /// Where the consecutive-reboot counter is kept.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Config set to check against; the positioner's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    #[serde(default = "default_max_displays")]
    pub max_displays: usize,
}

fn default_max_reboots() -> u32 {
    3
}
fn default_reboot_command() -> Vec<String> {
    ["shutdown", "-r", "now"].map(String::from).to_vec()
}
fn default_history_file() -> PathBuf {
    std::env::temp_dir().join("displaywatcher.history")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_displays() -> usize {
    DEFAULT_MAX_DISPLAYS
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            max_reboots: default_max_reboots(),
            reboot_command: default_reboot_command(),
            history_file: default_history_file(),
            log_level: default_log_level(),
            config_file: None,
            max_displays: default_max_displays(),
        }
    }
}

/// Loads settings from the default location, returning defaults if the
/// file (or the data directory) does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`], [`SettingsError::Parse`] or
/// [`SettingsError::Invalid`].
pub fn load_watcher_settings() -> Result<WatcherSettings, SettingsError> {
    match paths::watcher_settings_file_path() {
        Ok(path) => load_watcher_settings_from(&path),
        Err(_) => Ok(WatcherSettings::default()),
    }
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", [`SettingsError::Parse`] if the TOML is malformed and
/// [`SettingsError::Invalid`] if `max_displays` is 0.
pub fn load_watcher_settings_from(path: &Path) -> Result<WatcherSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let settings: WatcherSettings =
                toml::from_str(&content).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            validate_max_displays(path, settings.max_displays)?;
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(WatcherSettings::default()),
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
