//! Infrastructure layer for display-watcher.
//!
//! - **`history`** – File-backed reboot counter.
//! - **`reboot`** – Runs the configured reboot command (or only logs it).
//! - **`settings`** – `display.watcher.toml` loading with defaults.
//! - **`position_check`** – Adapts display-positioner's `Positioner` to the
//!   `PositionCheck` trait.

pub mod history;
pub mod position_check;
pub mod reboot;
pub mod settings;
