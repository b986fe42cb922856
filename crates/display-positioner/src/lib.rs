//! display-positioner library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`,
//! the binary entry point in `main.rs` and the `display-watcher` companion
//! share the same module tree.
//!
//! # What does display-positioner do? (for beginners)
//!
//! The tool remembers where every display sits in the desktop coordinate
//! space and puts displays back there on request:
//!
//! 1. `-s` captures the live arrangement and saves it to the config file.
//! 2. `-t` / `-p` compare the live arrangement with the saved one and report.
//! 3. `-c` compares and repositions displays only when they drifted.
//! 4. `-a` repositions unconditionally, refusing when the set of attached
//!    displays differs from the saved one.
//! 5. `-l` lists the attached displays and the cursor position.
//!
//! The comparison rules live in `positioner_core`; this crate wires them to
//! the operating system's display API and to the config file.

/// Application layer: display snapshot, mode use cases and the dispatcher.
pub mod application;

/// Infrastructure layer: OS display services and file storage.
pub mod infrastructure;
