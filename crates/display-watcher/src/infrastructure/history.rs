//! File-backed [`RebootHistory`].
//!
//! The file holds a single decimal integer.  A missing file means no reboot
//! has been attempted yet.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::watch::{HistoryError, RebootHistory};

/// Reboot counter stored in a plain text file.
#[derive(Debug, Clone)]
pub struct FileRebootHistory {
    path: PathBuf,
}

impl FileRebootHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RebootHistory for FileRebootHistory {
    fn previous_reboots(&self) -> Result<u32, HistoryError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        content.trim().parse().map_err(|_| HistoryError::Parse {
            path: self.path.clone(),
            content,
        })
    }

    fn record(&self, count: u32) -> Result<(), HistoryError> {
        std::fs::write(&self.path, count.to_string()).map_err(|source| HistoryError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count, "recorded reboot history");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_history_file_means_zero_reboots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let history = FileRebootHistory::new(dir.path().join("displaywatcher.history"));

        assert_eq!(history.previous_reboots().expect("read"), 0);
    }

    #[test]
    fn test_recorded_count_is_read_back() {
        // Arrange
        let dir = tempfile::tempdir().expect("tempdir");
        let history = FileRebootHistory::new(dir.path().join("displaywatcher.history"));

        // Act
        history.record(2).expect("record");

        // Assert
        assert_eq!(history.previous_reboots().expect("read"), 2);
        assert_eq!(std::fs::read_to_string(history.path()).expect("raw"), "2");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("displaywatcher.history");
        std::fs::write(&path, " 3\n").expect("seed");

        assert_eq!(FileRebootHistory::new(&path).previous_reboots().expect("read"), 3);
    }

    #[test]
    fn test_garbage_history_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("displaywatcher.history");
        std::fs::write(&path, "three").expect("seed");

        let result = FileRebootHistory::new(&path).previous_reboots();

        assert!(matches!(result, Err(HistoryError::Parse { .. })));
    }

    #[test]
    fn test_unwritable_location_is_a_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let history = FileRebootHistory::new(dir.path().join("missing-dir").join("history"));

        assert!(matches!(history.record(1), Err(HistoryError::Write { .. })));
    }
}
