//! ConfigRepository: persistence of the config set.
//!
//! The file-backed implementation is
//! `infrastructure::storage::config_store::FileConfigStore`.

use std::path::PathBuf;

use positioner_core::{ConfigFormatError, DisplaySet};
use thiserror::Error;

/// Error type for loading and saving the config set.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The config file could not be opened or read.
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file content is malformed.
    #[error("error parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigFormatError,
    },

    /// The config file (or its directory) could not be written.
    #[error("unable to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and saves the persisted config set.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigRepository {
    /// Reads the saved config set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] when nothing can be read and
    /// [`StoreError::Parse`] when the content is malformed.
    fn load(&self) -> Result<DisplaySet, StoreError>;

    /// Replaces the saved config set with `set`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the destination cannot be written.
    fn save(&self, set: &DisplaySet) -> Result<(), StoreError>;
}
