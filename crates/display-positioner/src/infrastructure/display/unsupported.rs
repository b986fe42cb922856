//! Fallback for platforms without a display backend.

use positioner_core::{DisplayId, DisplayRecord};

use crate::application::display_service::{
    DisplayDetails, DisplayScope, DisplayService, DisplayServiceError,
};

/// Fails every query with [`DisplayServiceError::Unsupported`].
#[derive(Default)]
pub struct UnsupportedDisplayService;

impl UnsupportedDisplayService {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayService for UnsupportedDisplayService {
    fn displays(&self, _: DisplayScope) -> Result<Vec<DisplayRecord>, DisplayServiceError> {
        Err(DisplayServiceError::Unsupported)
    }

    fn set_origin(&self, _: DisplayId, _: i32, _: i32) -> Result<(), DisplayServiceError> {
        Err(DisplayServiceError::Unsupported)
    }

    fn describe(&self) -> Result<Vec<DisplayDetails>, DisplayServiceError> {
        Err(DisplayServiceError::Unsupported)
    }

    fn cursor_location(&self) -> Option<(f64, f64)> {
        None
    }
}
