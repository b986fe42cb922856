//! Storage infrastructure: files under the per-user data directory.
//!
//! - **`paths`** – Resolves the platform data directory and the file names
//!   stored in it.
//! - **`config_store`** – Reads and writes the config set
//!   (`display.positioner.config`) through the `positioner_core` text format.
//! - **`settings`** – Optional TOML settings (`display.positioner.toml`),
//!   falling back to defaults when the file does not exist.

pub mod config_store;
pub mod paths;
pub mod settings;
