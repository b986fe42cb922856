//! File-backed [`ConfigRepository`].
//!
//! One record per line, `id, x, y`, in set order.  See
//! `positioner_core::format::config_file` for the exact grammar.

use std::path::PathBuf;

use positioner_core::{parse_config, render_config, ConfigFormatError, DisplaySet};
use tracing::debug;

use crate::application::config_repository::{ConfigRepository, StoreError};

/// Reads and writes the config set at a fixed path.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    max_displays: usize,
}

impl FileConfigStore {
    /// Creates a store for `path` that accepts at most `max_displays` records.
    pub fn new(path: impl Into<PathBuf>, max_displays: usize) -> Self {
        Self {
            path: path.into(),
            max_displays,
        }
    }
}

impl ConfigRepository for FileConfigStore {
    fn load(&self) -> Result<DisplaySet, StoreError> {
        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: ConfigFormatError::InvalidEncoding {
                offset: e.utf8_error().valid_up_to(),
            },
        })?;

        let set = parse_config(&text, self.max_displays).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = set.len(), "loaded config");
        Ok(set)
    }

    fn save(&self, set: &DisplaySet) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, render_config(set)).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = set.len(), "wrote config");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
