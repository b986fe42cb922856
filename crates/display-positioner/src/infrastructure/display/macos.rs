//! macOS display configuration via Core Graphics (`CGDisplay`).
//!
//! Display ids are `CGDirectDisplayID`s.  *Online* displays come from
//! `CGGetOnlineDisplayList` (includes sleeping and mirrored displays);
//! *active* displays from `CGGetActiveDisplayList`.
//!
//! # Implementation notes
//!
//! Core Graphics global coordinates already have a top-left origin at the
//! main display, so origins are stored and applied without conversion.
//! Every origin change is its own configuration transaction, completed with
//! `kCGConfigurePermanently` so it survives logout.

use core_graphics::base::CGError;
use core_graphics::display::{CGConfigureOption, CGDirectDisplayID, CGDisplay};
use core_graphics::event::CGEvent;
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use positioner_core::{DisplayId, DisplayRecord};
use tracing::debug;

use crate::application::display_service::{
    DisplayDetails, DisplayScope, DisplayService, DisplayServiceError,
};

/// Upper bound passed to the display list calls.
const MAX_QUERY_DISPLAYS: u32 = 64;

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGGetOnlineDisplayList(
        max_displays: u32,
        online_displays: *mut CGDirectDisplayID,
        display_count: *mut u32,
    ) -> CGError;
}

/// macOS implementation of [`DisplayService`] via Core Graphics.
pub struct MacosDisplayService;

impl MacosDisplayService {
    /// Creates a new `MacosDisplayService`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacosDisplayService {
    fn default() -> Self {
        Self::new()
    }
}

fn online_displays() -> Result<Vec<CGDirectDisplayID>, DisplayServiceError> {
    let mut ids: Vec<CGDirectDisplayID> = vec![0; MAX_QUERY_DISPLAYS as usize];
    let mut count: u32 = 0;

    // SAFETY: `ids` has room for MAX_QUERY_DISPLAYS entries and `count` is a
    // valid out-pointer; Core Graphics writes at most that many ids.
    let err = unsafe { CGGetOnlineDisplayList(MAX_QUERY_DISPLAYS, ids.as_mut_ptr(), &mut count) };
    if err != 0 {
        return Err(DisplayServiceError::Platform(format!(
            "CGGetOnlineDisplayList failed with error {err}"
        )));
    }

    ids.truncate(count as usize);
    Ok(ids)
}

fn active_displays() -> Result<Vec<CGDirectDisplayID>, DisplayServiceError> {
    CGDisplay::active_displays().map_err(|err| {
        DisplayServiceError::Platform(format!("CGGetActiveDisplayList failed with error {err}"))
    })
}

fn record_for(id: CGDirectDisplayID) -> DisplayRecord {
    let bounds = CGDisplay::new(id).bounds();
    DisplayRecord::new(id, bounds.origin.x as i32, bounds.origin.y as i32)
}

impl DisplayService for MacosDisplayService {
    fn displays(&self, scope: DisplayScope) -> Result<Vec<DisplayRecord>, DisplayServiceError> {
        let ids = match scope {
            DisplayScope::Online => online_displays()?,
            DisplayScope::Active => active_displays()?,
        };
        Ok(ids.into_iter().map(record_for).collect())
    }

    fn set_origin(&self, id: DisplayId, x: i32, y: i32) -> Result<(), DisplayServiceError> {
        if !active_displays()?.contains(&id.get()) {
            return Err(DisplayServiceError::UnknownDisplay(id));
        }

        let display = CGDisplay::new(id.get());
        let config = display.begin_configuration().map_err(|err| {
            DisplayServiceError::Platform(format!("CGBeginDisplayConfiguration failed with error {err}"))
        })?;

        if let Err(err) = display.configure_display_origin(&config, x, y) {
            // Best effort; the configure error is the one worth reporting.
            let _ = display.cancel_configuration(&config);
            return Err(DisplayServiceError::Platform(format!(
                "CGConfigureDisplayOrigin failed with error {err}"
            )));
        }

        display
            .complete_configuration(&config, CGConfigureOption::ConfigurePermanently)
            .map_err(|err| {
                DisplayServiceError::Platform(format!(
                    "CGCompleteDisplayConfiguration failed with error {err}"
                ))
            })?;

        debug!(display = id.get(), x, y, "display origin configured");
        Ok(())
    }

    fn describe(&self) -> Result<Vec<DisplayDetails>, DisplayServiceError> {
        Ok(online_displays()?
            .into_iter()
            .map(|id| {
                let display = CGDisplay::new(id);
                let bounds = display.bounds();
                DisplayDetails {
                    id: DisplayId(id),
                    unit_number: display.unit_number(),
                    width: display.pixels_wide() as u32,
                    height: display.pixels_high() as u32,
                    x: bounds.origin.x as i32,
                    y: bounds.origin.y as i32,
                    rotation: display.rotation(),
                    is_active: display.is_active(),
                    is_main: display.is_main(),
                    is_builtin: display.is_builtin(),
                }
            })
            .collect())
    }

    fn cursor_location(&self) -> Option<(f64, f64)> {
        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState).ok()?;
        let event = CGEvent::new(source).ok()?;
        let point = event.location();
        Some((point.x, point.y))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke-test: on a macOS machine with at least one display this must succeed.
    #[test]
    fn test_macos_online_displays_include_every_active_display() {
        let service = MacosDisplayService::new();
        let online = service.displays(DisplayScope::Online).expect("online displays");
        let active = service.displays(DisplayScope::Active).expect("active displays");

        for record in &active {
            assert!(
                online.iter().any(|o| o.id == record.id),
                "active display {} missing from online list",
                record.id
            );
        }
    }

    #[test]
    fn test_macos_main_display_sits_at_origin() {
        let service = MacosDisplayService::new();
        let details = service.describe().expect("describe");
        if let Some(main) = details.iter().find(|d| d.is_main) {
            assert_eq!((main.x, main.y), (0, 0));
        }
    }
}
