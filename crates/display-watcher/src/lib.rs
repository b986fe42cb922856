//! display-watcher library entry point.
//!
//! Some machines come back from a reboot with their displays shuffled and
//! only another reboot fixes it.  The watcher runs once at login, asks
//! display-positioner whether the arrangement matches the saved one and, if
//! not, reboots the machine.  A small history file counts consecutive
//! reboots so a permanently broken setup gives up after `max_reboots`
//! attempts instead of looping forever.

/// Application layer: the watch decision and the traits it depends on.
pub mod application;

/// Infrastructure layer: history file, reboot command, settings and the
/// display-positioner adapter.
pub mod infrastructure;
