//! Infrastructure layer for display-positioner.
//!
//! Contains OS-facing adapters: the display configuration APIs and the files
//! under the per-user data directory.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `positioner_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`display`** – OS-specific implementations of `DisplayService`.  The
//!   correct implementation is selected at compile time using
//!   `#[cfg(target_os)]`.  A `MockDisplayService` is also provided for tests.
//!
//! - **`storage`** – The config file store and the optional TOML settings
//!   file, both located under the platform data directory.

pub mod display;
pub mod storage;
