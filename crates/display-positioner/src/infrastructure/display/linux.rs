//! Linux display configuration via the X11 RandR extension.
//!
//! Each connected RandR output is one display; its id is the output XID.
//! An output is *online* when it is connected and *active* when it also
//! drives a CRTC.  Repositioning reprograms the output's CRTC with its
//! current mode and rotation at the new origin.
//!
//! # Implementation notes
//!
//! X11 screen coordinates start at `(0, 0)`; negative origins are rejected.
//! When the new position reaches past the current screen, the screen is
//! grown first with `RRSetScreenSize` (X refuses CRTCs outside the screen).
//! The screen is never shrunk.

use x11rb::connection::Connection;
use x11rb::protocol::randr::{
    self, ConnectionExt as _, GetCrtcInfoReply, GetScreenResourcesCurrentReply, Rotation,
    SetConfig,
};
use x11rb::protocol::xproto::{ConnectionExt as _, Window};
use x11rb::rust_connection::RustConnection;

use positioner_core::{DisplayId, DisplayRecord};
use tracing::debug;

use crate::application::display_service::{
    DisplayDetails, DisplayScope, DisplayService, DisplayServiceError,
};

/// Millimetres per pixel at 96 DPI, scaled by 1000.
const MM_PER_PX_X1000: u32 = 265;

/// Linux X11 implementation of [`DisplayService`].
///
/// Opens a fresh connection to `$DISPLAY` for every call.
pub struct X11DisplayService;

impl X11DisplayService {
    /// Creates a new `X11DisplayService`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for X11DisplayService {
    fn default() -> Self {
        Self::new()
    }
}

/// One connected output and, when active, the CRTC driving it.
struct Output {
    id: randr::Output,
    name: String,
    crtc_id: randr::Crtc,
    crtc: Option<GetCrtcInfoReply>,
}

impl Output {
    fn origin(&self) -> (i32, i32) {
        self.crtc
            .as_ref()
            .map_or((0, 0), |c| (i32::from(c.x), i32::from(c.y)))
    }
}

/// An open connection plus the root window of the default screen.
struct Session {
    conn: RustConnection,
    root: Window,
}

impl Session {
    fn open() -> Result<Self, DisplayServiceError> {
        let (conn, screen_num) = RustConnection::connect(None).map_err(|e| {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            platform(format!("X11 connect failed ({e}); DISPLAY={display_env}"))
        })?;
        let root = conn.setup().roots[screen_num].root;

        conn.randr_query_version(1, 3)
            .map_err(|e| platform(format!("RandR unavailable: {e}")))?
            .reply()
            .map_err(|e| platform(format!("RandR unavailable: {e}")))?;

        Ok(Self { conn, root })
    }

    fn resources(&self) -> Result<GetScreenResourcesCurrentReply, DisplayServiceError> {
        self.conn
            .randr_get_screen_resources_current(self.root)
            .map_err(|e| platform(format!("RRGetScreenResourcesCurrent failed: {e}")))?
            .reply()
            .map_err(|e| platform(format!("RRGetScreenResourcesCurrent failed: {e}")))
    }

    /// Returns the connected outputs in resource order.
    fn outputs(
        &self,
        resources: &GetScreenResourcesCurrentReply,
    ) -> Result<Vec<Output>, DisplayServiceError> {
        let mut outputs = Vec::with_capacity(resources.outputs.len());

        for &id in &resources.outputs {
            let info = self
                .conn
                .randr_get_output_info(id, resources.config_timestamp)
                .map_err(|e| platform(format!("RRGetOutputInfo failed: {e}")))?
                .reply()
                .map_err(|e| platform(format!("RRGetOutputInfo failed: {e}")))?;
            if info.connection != randr::Connection::CONNECTED {
                continue;
            }

            let crtc = if info.crtc == x11rb::NONE {
                None
            } else {
                Some(
                    self.conn
                        .randr_get_crtc_info(info.crtc, resources.config_timestamp)
                        .map_err(|e| platform(format!("RRGetCrtcInfo failed: {e}")))?
                        .reply()
                        .map_err(|e| platform(format!("RRGetCrtcInfo failed: {e}")))?,
                )
            };

            outputs.push(Output {
                id,
                name: String::from_utf8_lossy(&info.name).into_owned(),
                crtc_id: info.crtc,
                crtc,
            });
        }
        Ok(outputs)
    }

    fn primary(&self) -> Option<randr::Output> {
        self.conn
            .randr_get_output_primary(self.root)
            .ok()?
            .reply()
            .ok()
            .map(|r| r.output)
    }

    /// Grows the screen so that every active CRTC fits.
    fn ensure_screen_fits(&self, width: u32, height: u32) -> Result<(), DisplayServiceError> {
        let geometry = self
            .conn
            .get_geometry(self.root)
            .map_err(|e| platform(format!("GetGeometry failed: {e}")))?
            .reply()
            .map_err(|e| platform(format!("GetGeometry failed: {e}")))?;

        let current_w = u32::from(geometry.width);
        let current_h = u32::from(geometry.height);
        if width <= current_w && height <= current_h {
            return Ok(());
        }

        let new_w = width.max(current_w);
        let new_h = height.max(current_h);
        let (Ok(w16), Ok(h16)) = (u16::try_from(new_w), u16::try_from(new_h)) else {
            return Err(platform(format!("screen size {new_w}x{new_h} is too large")));
        };
        debug!(width = new_w, height = new_h, "growing X screen");

        self.conn
            .randr_set_screen_size(
                self.root,
                w16,
                h16,
                new_w * MM_PER_PX_X1000 / 1000,
                new_h * MM_PER_PX_X1000 / 1000,
            )
            .map_err(|e| platform(format!("RRSetScreenSize failed: {e}")))?
            .check()
            .map_err(|e| platform(format!("RRSetScreenSize failed: {e}")))
    }
}

impl DisplayService for X11DisplayService {
    fn displays(&self, scope: DisplayScope) -> Result<Vec<DisplayRecord>, DisplayServiceError> {
        let session = Session::open()?;
        let resources = session.resources()?;

        Ok(session
            .outputs(&resources)?
            .iter()
            .filter(|o| scope == DisplayScope::Online || o.crtc.is_some())
            .map(|o| {
                let (x, y) = o.origin();
                DisplayRecord::new(o.id, x, y)
            })
            .collect())
    }

    fn set_origin(&self, id: DisplayId, x: i32, y: i32) -> Result<(), DisplayServiceError> {
        let (Ok(x16), Ok(y16)) = (i16::try_from(x), i16::try_from(y)) else {
            return Err(outside_screen(x, y));
        };
        if x16 < 0 || y16 < 0 {
            return Err(outside_screen(x, y));
        }

        let session = Session::open()?;
        let resources = session.resources()?;
        let outputs = session.outputs(&resources)?;

        let target = outputs
            .iter()
            .find(|o| o.id == id.get())
            .ok_or(DisplayServiceError::UnknownDisplay(id))?;
        let crtc = target
            .crtc
            .as_ref()
            .ok_or(DisplayServiceError::UnknownDisplay(id))?;

        // Screen extent once the target has moved.
        let (mut width, mut height) = (
            extent(x16, crtc.width),
            extent(y16, crtc.height),
        );
        for other in outputs.iter().filter(|o| o.id != target.id) {
            if let Some(c) = &other.crtc {
                width = width.max(extent(c.x, c.width));
                height = height.max(extent(c.y, c.height));
            }
        }
        session.ensure_screen_fits(width, height)?;

        debug!(output = target.name.as_str(), x, y, "RRSetCrtcConfig");
        let reply = session
            .conn
            .randr_set_crtc_config(
                target.crtc_id,
                crtc.timestamp,
                resources.config_timestamp,
                x16,
                y16,
                crtc.mode,
                crtc.rotation,
                &crtc.outputs,
            )
            .map_err(|e| platform(format!("RRSetCrtcConfig failed: {e}")))?
            .reply()
            .map_err(|e| platform(format!("RRSetCrtcConfig failed: {e}")))?;

        if reply.status != SetConfig::SUCCESS {
            return Err(platform(format!(
                "RRSetCrtcConfig for {} returned {:?}",
                target.name, reply.status
            )));
        }
        Ok(())
    }

    fn describe(&self) -> Result<Vec<DisplayDetails>, DisplayServiceError> {
        let session = Session::open()?;
        let resources = session.resources()?;
        let primary = session.primary();

        Ok(session
            .outputs(&resources)?
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let (x, y) = o.origin();
                let (width, height, rotation) = o.crtc.as_ref().map_or((0, 0, 0.0), |c| {
                    (u32::from(c.width), u32::from(c.height), degrees(c.rotation))
                });
                DisplayDetails {
                    id: DisplayId(o.id),
                    unit_number: i as u32,
                    width,
                    height,
                    x,
                    y,
                    rotation,
                    is_active: o.crtc.is_some(),
                    is_main: primary == Some(o.id),
                    is_builtin: is_builtin_panel(&o.name),
                }
            })
            .collect())
    }

    fn cursor_location(&self) -> Option<(f64, f64)> {
        let session = Session::open().ok()?;
        let pointer = session.conn.query_pointer(session.root).ok()?.reply().ok()?;
        Some((f64::from(pointer.root_x), f64::from(pointer.root_y)))
    }
}

fn platform(message: String) -> DisplayServiceError {
    DisplayServiceError::Platform(message)
}

fn outside_screen(x: i32, y: i32) -> DisplayServiceError {
    platform(format!(
        "origin ({x}, {y}) is outside the X11 screen coordinate range"
    ))
}

/// Far edge of a CRTC along one axis, clamped at zero.
fn extent(origin: i16, size: u16) -> u32 {
    (i32::from(origin) + i32::from(size)).max(0) as u32
}

fn degrees(rotation: Rotation) -> f64 {
    let bits = u16::from(rotation);
    if bits & u16::from(Rotation::ROTATE90) != 0 {
        90.0
    } else if bits & u16::from(Rotation::ROTATE180) != 0 {
        180.0
    } else if bits & u16::from(Rotation::ROTATE270) != 0 {
        270.0
    } else {
        0.0
    }
}

/// Laptop panels are exposed through eDP, LVDS or DSI connectors.
fn is_builtin_panel(output_name: &str) -> bool {
    ["eDP", "LVDS", "DSI"]
        .iter()
        .any(|prefix| output_name.starts_with(prefix))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke-test: without a DISPLAY the connection must fail cleanly.
    #[test]
    fn test_x11_display_service_smoke() {
        let service = X11DisplayService::new();
        let result = service.displays(DisplayScope::Online);

        if std::env::var("DISPLAY").is_err() {
            assert!(
                matches!(result, Err(DisplayServiceError::Platform(_))),
                "displays must fail when DISPLAY is not set"
            );
        }
    }

    #[test]
    fn test_set_origin_rejects_negative_coordinates_before_connecting() {
        let service = X11DisplayService::new();
        let result = service.set_origin(DisplayId(1), -1920, 0);
        match result {
            Err(DisplayServiceError::Platform(message)) => {
                assert!(message.contains("outside the X11 screen"), "got: {message}");
            }
            other => panic!("expected a platform error, got {other:?}"),
        }
    }

    #[test]
    fn test_extent_adds_size_to_origin() {
        assert_eq!(extent(1920, 2560), 4480);
        assert_eq!(extent(-100, 50), 0);
    }

    #[test]
    fn test_rotation_bits_map_to_degrees() {
        assert_eq!(degrees(Rotation::ROTATE0), 0.0);
        assert_eq!(degrees(Rotation::ROTATE90), 90.0);
        assert_eq!(degrees(Rotation::ROTATE270 | Rotation::REFLECT_X), 270.0);
    }

    #[test]
    fn test_builtin_panel_detection_uses_connector_name() {
        assert!(is_builtin_panel("eDP-1"));
        assert!(is_builtin_panel("LVDS1"));
        assert!(!is_builtin_panel("HDMI-1"));
        assert!(!is_builtin_panel("DP-2"));
    }
}
