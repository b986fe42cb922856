//! Domain entities for Display Positioner.
//!
//! This module contains pure logic with no infrastructure dependencies: it
//! can be compiled and tested on any platform without a display attached.
//!
//! Code in outer layers (the CLI, the platform display services, the file
//! store) depends on the domain, but the domain never depends on them.

/// Display identities, records and bounded display sets.
pub mod display;

/// Comparison of a config set against a system set.
///
/// See [`reconcile::compare`] and [`reconcile::plan_apply`].
pub mod reconcile;
