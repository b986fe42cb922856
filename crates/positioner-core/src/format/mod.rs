//! Text formats for persisted display arrangements.
//!
//! - **`config_file`** – the flat `id, x, y` per line format of the saved
//!   config set.

pub mod config_file;
