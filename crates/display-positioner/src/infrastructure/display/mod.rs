//! Platform-specific display enumeration and repositioning.
//!
//! Each platform implements [`DisplayService`]; the correct one is selected
//! at compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeDisplayService`:
//!
//! | Module        | OS      | API used                                                |
//! |---------------|---------|---------------------------------------------------------|
//! | `macos`       | macOS   | `CGGetOnlineDisplayList` + `CGConfigureDisplayOrigin`   |
//! | `linux`       | Linux   | RandR `GetScreenResourcesCurrent` + `SetCrtcConfig`     |
//! | `unsupported` | other   | none; every call fails with `Unsupported`               |
//!
//! A [`mock::MockDisplayService`] is always compiled (not guarded by
//! `#[cfg]`) so tests on any platform can use it without a physical display.
//!
//! [`DisplayService`]: crate::application::display_service::DisplayService

pub mod mock;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

/// Re-export the X11 service as `NativeDisplayService` on Linux.
#[cfg(target_os = "linux")]
pub use linux::X11DisplayService as NativeDisplayService;

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

/// Re-export the Core Graphics service as `NativeDisplayService` on macOS.
#[cfg(target_os = "macos")]
pub use macos::MacosDisplayService as NativeDisplayService;

// ── Other platforms ───────────────────────────────────────────────────────────

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub mod unsupported;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub use unsupported::UnsupportedDisplayService as NativeDisplayService;
