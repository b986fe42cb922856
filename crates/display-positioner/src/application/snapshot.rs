//! Display snapshot: the live system set, captured once per run.

use positioner_core::{DisplaySet, DisplaySetError};
use thiserror::Error;
use tracing::debug;

use super::display_service::{DisplayScope, DisplayService, DisplayServiceError};

/// Error type for snapshot capture.  Always fatal for the current run.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The display service failed.
    #[error("error getting display list: {0}")]
    Query(#[from] DisplayServiceError),

    /// The platform reported more displays than allowed, or a duplicate id.
    #[error("error getting display list: {0}")]
    InvalidSet(#[from] DisplaySetError),
}

/// Queries `service` for the displays in `scope` and builds the system set.
///
/// # Errors
///
/// Returns [`SnapshotError::Query`] if the platform call fails and
/// [`SnapshotError::InvalidSet`] if more than `max_displays` displays are
/// reported or an id repeats.
pub fn capture(
    service: &dyn DisplayService,
    scope: DisplayScope,
    max_displays: usize,
) -> Result<DisplaySet, SnapshotError> {
    let records = service.displays(scope)?;
    let set = DisplaySet::new(records, max_displays)?;
    debug!(?scope, count = set.len(), "captured display snapshot");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::display_service::DisplayDetails;
    use positioner_core::{DisplayId, DisplayRecord};

    /// Returns a fixed list for every scope, or fails.
    struct FixedDisplays {
        records: Vec<DisplayRecord>,
        should_fail: bool,
    }

    impl DisplayService for FixedDisplays {
        fn displays(&self, _: DisplayScope) -> Result<Vec<DisplayRecord>, DisplayServiceError> {
            if self.should_fail {
                return Err(DisplayServiceError::Platform("injected failure".to_string()));
            }
            Ok(self.records.clone())
        }

        fn set_origin(&self, id: DisplayId, _: i32, _: i32) -> Result<(), DisplayServiceError> {
            Err(DisplayServiceError::UnknownDisplay(id))
        }

        fn describe(&self) -> Result<Vec<DisplayDetails>, DisplayServiceError> {
            Ok(Vec::new())
        }

        fn cursor_location(&self) -> Option<(f64, f64)> {
            None
        }
    }

    fn fixed(n: u32) -> FixedDisplays {
        FixedDisplays {
            records: (0..n).map(|i| DisplayRecord::new(i + 1, 1920 * i as i32, 0)).collect(),
            should_fail: false,
        }
    }

    #[test]
    fn test_capture_keeps_enumeration_order() {
        // Arrange
        let service = fixed(3);

        // Act
        let set = capture(&service, DisplayScope::Online, 16).expect("capture");

        // Assert
        let ids: Vec<u32> = set.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_capture_fails_when_platform_reports_too_many_displays() {
        let service = fixed(3);
        let result = capture(&service, DisplayScope::Online, 2);
        assert!(matches!(
            result,
            Err(SnapshotError::InvalidSet(DisplaySetError::TooManyDisplays { count: 3, max: 2 }))
        ));
    }

    #[test]
    fn test_capture_propagates_platform_failure() {
        let service = FixedDisplays {
            records: Vec::new(),
            should_fail: true,
        };
        let result = capture(&service, DisplayScope::Active, 16);
        assert!(matches!(
            result,
            Err(SnapshotError::Query(DisplayServiceError::Platform(_)))
        ));
    }

    #[test]
    fn test_capture_rejects_duplicate_platform_ids() {
        let service = FixedDisplays {
            records: vec![DisplayRecord::new(1, 0, 0), DisplayRecord::new(1, 1920, 0)],
            should_fail: false,
        };
        let result = capture(&service, DisplayScope::Online, 16);
        assert!(matches!(
            result,
            Err(SnapshotError::InvalidSet(DisplaySetError::DuplicateId(_)))
        ));
    }
}
