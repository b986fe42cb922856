//! # positioner-core
//!
//! Shared library for Display Positioner containing the display domain
//! entities, the reconciler that compares a saved arrangement against the
//! live one, and the plain-text config file format.
//!
//! This crate is used by both the `display-positioner` CLI and the
//! `display-watcher` companion.  It has zero dependencies on OS display APIs
//! or the file system.
//!
//! # Architecture overview (for beginners)
//!
//! Display Positioner restores a multi-monitor arrangement.  The operating
//! system gives every attached display a stable numeric identity and places
//! its top-left corner (its *origin*) somewhere in a shared desktop
//! coordinate space.  Docking, sleeping or rebooting sometimes shuffles those
//! origins; the tool saves a known-good arrangement once and puts displays
//! back where they belong afterwards.
//!
//! - **`domain`** – The data types ([`DisplayRecord`], [`DisplaySet`]) and the
//!   reconciler: pure functions that decide whether the saved *config set*
//!   and the live *system set* agree, what differs, and which origin changes
//!   would bring the system back in line.
//!
//! - **`format`** – How a [`DisplaySet`] is written to and read from the
//!   config file (`id, x, y` per line).

pub mod domain;
pub mod format;

// Re-export the most-used types at the crate root so callers can write
// `positioner_core::DisplaySet` instead of `positioner_core::domain::display::DisplaySet`.
pub use domain::display::{
    DisplayId, DisplayRecord, DisplaySet, DisplaySetError, DEFAULT_MAX_DISPLAYS,
};
pub use domain::reconcile::{
    compare, divergences, ids_match, plan_apply, values_match, Comparison, Divergence,
    OriginChange,
};
pub use format::config_file::{parse_config, render_config, ConfigFormatError};
