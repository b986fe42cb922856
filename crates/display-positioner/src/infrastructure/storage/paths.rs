//! Platform data directory and the files kept in it.
//!
//! - macOS:    `~/Library/Application Support`
//! - Linux:    `$XDG_DATA_HOME` or `~/.local/share`
//! - Windows:  `%APPDATA%`
//!
//! The files live directly in that directory (no application subdirectory)
//! so existing config files keep working.

use std::path::PathBuf;

use thiserror::Error;

/// File name of the config set.
pub const CONFIG_FILE_NAME: &str = "display.positioner.config";

/// File name of the positioner settings.
pub const SETTINGS_FILE_NAME: &str = "display.positioner.toml";

/// File name of the display-watcher settings.
pub const WATCHER_SETTINGS_FILE_NAME: &str = "display.watcher.toml";

/// The per-user data directory could not be determined.
#[derive(Debug, Error)]
#[error("could not determine the per-user data directory")]
pub struct NoDataDir;

/// Returns the platform data directory.
///
/// # Errors
///
/// Returns [`NoDataDir`] if the relevant environment variables are unset.
pub fn data_dir() -> Result<PathBuf, NoDataDir> {
    platform_data_dir().ok_or(NoDataDir)
}

/// Returns the default path of the config set.
///
/// # Errors
///
/// Returns [`NoDataDir`] if the data directory cannot be determined.
pub fn config_file_path() -> Result<PathBuf, NoDataDir> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}

/// Returns the default path of the positioner settings.
///
/// # Errors
///
/// Returns [`NoDataDir`] if the data directory cannot be determined.
pub fn settings_file_path() -> Result<PathBuf, NoDataDir> {
    Ok(data_dir()?.join(SETTINGS_FILE_NAME))
}

/// Returns the default path of the display-watcher settings.
///
/// # Errors
///
/// Returns [`NoDataDir`] if the data directory cannot be determined.
pub fn watcher_settings_file_path() -> Result<PathBuf, NoDataDir> {
    Ok(data_dir()?.join(WATCHER_SETTINGS_FILE_NAME))
}

fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_DATA_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
