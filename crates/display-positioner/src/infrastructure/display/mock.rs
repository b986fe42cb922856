//! Mock display service for unit and integration testing.
//!
//! The real services move physical displays, need a running window server
//! and cannot be observed from test code.  `MockDisplayService` keeps the
//! arrangement in memory: every `set_origin` call updates the stored origin
//! and is recorded so tests can assert exactly what was applied and in what
//! order.
//!
//! Set `should_fail = true` to make every call return
//! `DisplayServiceError::Platform`, or `fail_set_origin = true` to fail only
//! the repositioning calls.

use std::sync::Mutex;

use positioner_core::{DisplayId, DisplayRecord, OriginChange};

use crate::application::display_service::{
    DisplayDetails, DisplayScope, DisplayService, DisplayServiceError,
};

/// An in-memory display arrangement.
#[derive(Default)]
pub struct MockDisplayService {
    displays: Mutex<Vec<DisplayRecord>>,
    /// Online displays that are not active (asleep or mirrored).
    inactive: Vec<DisplayId>,
    applied: Mutex<Vec<OriginChange>>,
    cursor: Option<(f64, f64)>,
    /// When `true`, every method returns a platform error.
    pub should_fail: bool,
    /// When `true`, only `set_origin` returns a platform error.
    pub fail_set_origin: bool,
}

impl MockDisplayService {
    /// Creates a mock whose displays are all online and active.
    pub fn new(displays: Vec<DisplayRecord>) -> Self {
        Self {
            displays: Mutex::new(displays),
            ..Self::default()
        }
    }

    /// Marks `ids` as online but inactive.
    pub fn with_inactive(mut self, ids: &[DisplayId]) -> Self {
        self.inactive = ids.to_vec();
        self
    }

    /// Sets the cursor position reported by `cursor_location`.
    pub fn with_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor = Some((x, y));
        self
    }

    /// Returns the current arrangement in enumeration order.
    pub fn origins(&self) -> Vec<DisplayRecord> {
        self.displays
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    /// Returns every successful `set_origin` call in call order.
    pub fn applied_changes(&self) -> Vec<OriginChange> {
        self.applied
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }

    fn is_active(&self, id: DisplayId) -> bool {
        !self.inactive.contains(&id)
    }

    fn injected_failure(&self) -> Result<(), DisplayServiceError> {
        if self.should_fail {
            return Err(DisplayServiceError::Platform(
                "mock display service failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl DisplayService for MockDisplayService {
    fn displays(&self, scope: DisplayScope) -> Result<Vec<DisplayRecord>, DisplayServiceError> {
        self.injected_failure()?;
        let displays = self.displays.lock().map_err(|_| poisoned())?;
        Ok(displays
            .iter()
            .filter(|r| scope == DisplayScope::Online || self.is_active(r.id))
            .copied()
            .collect())
    }

    fn set_origin(&self, id: DisplayId, x: i32, y: i32) -> Result<(), DisplayServiceError> {
        self.injected_failure()?;
        if self.fail_set_origin {
            return Err(DisplayServiceError::Platform(
                "mock set_origin failure".to_string(),
            ));
        }
        if !self.is_active(id) {
            return Err(DisplayServiceError::UnknownDisplay(id));
        }

        let mut displays = self.displays.lock().map_err(|_| poisoned())?;
        let record = displays
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DisplayServiceError::UnknownDisplay(id))?;
        record.x = x;
        record.y = y;

        self.applied
            .lock()
            .map_err(|_| poisoned())?
            .push(OriginChange { id, x, y });
        Ok(())
    }

    fn describe(&self) -> Result<Vec<DisplayDetails>, DisplayServiceError> {
        self.injected_failure()?;
        let displays = self.displays.lock().map_err(|_| poisoned())?;
        Ok(displays
            .iter()
            .enumerate()
            .map(|(i, r)| DisplayDetails {
                id: r.id,
                unit_number: i as u32,
                width: 1920,
                height: 1080,
                x: r.x,
                y: r.y,
                rotation: 0.0,
                is_active: self.is_active(r.id),
                is_main: r.x == 0 && r.y == 0,
                is_builtin: i == 0,
            })
            .collect())
    }

    fn cursor_location(&self) -> Option<(f64, f64)> {
        self.cursor
    }
}

fn poisoned() -> DisplayServiceError {
    DisplayServiceError::Platform("mock display state lock poisoned".to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> MockDisplayService {
        MockDisplayService::new(vec![
            DisplayRecord::new(1, 0, 0),
            DisplayRecord::new(2, 1920, 0),
        ])
    }

    #[test]
    fn test_mock_set_origin_updates_arrangement_and_records_call() {
        // Arrange
        let service = dual();

        // Act
        service.set_origin(DisplayId(2), -1920, 0).expect("set origin");

        // Assert
        assert_eq!(service.origins()[1], DisplayRecord::new(2, -1920, 0));
        assert_eq!(
            service.applied_changes(),
            vec![OriginChange {
                id: DisplayId(2),
                x: -1920,
                y: 0
            }]
        );
    }

    #[test]
    fn test_mock_active_scope_hides_inactive_displays() {
        let service = dual().with_inactive(&[DisplayId(2)]);

        let online = service.displays(DisplayScope::Online).expect("online");
        let active = service.displays(DisplayScope::Active).expect("active");

        assert_eq!(online.len(), 2);
        assert_eq!(active, vec![DisplayRecord::new(1, 0, 0)]);
    }

    #[test]
    fn test_mock_set_origin_rejects_inactive_display() {
        let service = dual().with_inactive(&[DisplayId(2)]);

        let result = service.set_origin(DisplayId(2), 0, 0);

        assert!(matches!(
            result,
            Err(DisplayServiceError::UnknownDisplay(DisplayId(2)))
        ));
        assert!(service.applied_changes().is_empty());
    }

    #[test]
    fn test_mock_fail_set_origin_still_answers_queries() {
        // Arrange
        let mut service = dual();
        service.fail_set_origin = true;

        // Act
        let listed = service.displays(DisplayScope::Online);
        let moved = service.set_origin(DisplayId(1), 5, 5);

        // Assert
        assert!(listed.is_ok());
        assert!(matches!(moved, Err(DisplayServiceError::Platform(_))));
        assert_eq!(service.origins()[0], DisplayRecord::new(1, 0, 0));
    }

    #[test]
    fn test_mock_should_fail_returns_platform_error() {
        let mut service = dual();
        service.should_fail = true;

        assert!(matches!(
            service.displays(DisplayScope::Online),
            Err(DisplayServiceError::Platform(_))
        ));
    }
}
