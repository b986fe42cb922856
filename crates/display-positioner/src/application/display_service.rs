//! DisplayService: the seam between the use cases and the OS display API.

use positioner_core::{DisplayId, DisplayRecord};
use thiserror::Error;

/// Error type for display service operations.
#[derive(Debug, Error)]
pub enum DisplayServiceError {
    /// The platform API call failed.
    ///
    /// The inner string is a human-readable description of the OS error,
    /// e.g. "CGGetOnlineDisplayList failed with error 1001".
    #[error("platform API error: {0}")]
    Platform(String),

    /// The named display is not attached (or not active) any more.
    #[error("display {0} is not attached")]
    UnknownDisplay(DisplayId),

    /// No display backend exists for this operating system.
    #[error("display configuration is not supported on this platform")]
    Unsupported,
}

/// Which displays a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayScope {
    /// Every display the system knows about, including sleeping or mirrored ones.
    Online,
    /// Only displays that are currently drawable and can be repositioned.
    Active,
}

/// Everything the `-l` listing prints about one display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayDetails {
    pub id: DisplayId,
    /// Logical unit number assigned by the OS.
    pub unit_number: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Origin X in desktop coordinates.
    pub x: i32,
    /// Origin Y in desktop coordinates.
    pub y: i32,
    /// Rotation in degrees.
    pub rotation: f64,
    pub is_active: bool,
    pub is_main: bool,
    /// `true` for a built-in (laptop) panel.
    pub is_builtin: bool,
}

impl DisplayDetails {
    /// Returns the `(id, x, y)` record used for reconciliation.
    pub fn record(&self) -> DisplayRecord {
        DisplayRecord::new(self.id, self.x, self.y)
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// Platform display API as seen by the use cases.
///
/// Implementors live in `infrastructure::display`; the correct one is
/// selected at compile time.  Every call is synchronous and expected to
/// return promptly.
pub trait DisplayService: Send + Sync {
    /// Returns `(id, x, y)` for the displays in `scope`, in platform
    /// enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayServiceError::Platform`] if the OS call fails.
    fn displays(&self, scope: DisplayScope) -> Result<Vec<DisplayRecord>, DisplayServiceError>;

    /// Moves display `id` so its top-left corner is at `(x, y)`.
    ///
    /// The change is made permanent where the platform distinguishes
    /// session-only and permanent configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayServiceError`] if the display is unknown or the OS
    /// rejects the configuration.
    fn set_origin(&self, id: DisplayId, x: i32, y: i32) -> Result<(), DisplayServiceError>;

    /// Returns listing details for every online display.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayServiceError::Platform`] if the OS call fails.
    fn describe(&self) -> Result<Vec<DisplayDetails>, DisplayServiceError>;

    /// Returns the mouse cursor position in desktop coordinates, if known.
    fn cursor_location(&self) -> Option<(f64, f64)>;
}
