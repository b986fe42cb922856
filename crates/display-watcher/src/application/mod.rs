//! Application layer use cases for display-watcher.
//!
//! - **`watch`** – The one-shot watch run: check, read history, decide,
//!   then reset the history or record the attempt and reboot.

pub mod watch;
