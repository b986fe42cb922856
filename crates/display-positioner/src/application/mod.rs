//! Application layer use cases for display-positioner.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the domain (`positioner_core`: pure
//! comparison rules) and the infrastructure (OS display APIs, files).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain functions to fulfil one command-line mode.
//! - **Depend on abstractions** ([`display_service::DisplayService`],
//!   [`config_repository::ConfigRepository`]) rather than concrete
//!   implementations, so tests run without a display or a home directory.
//! - **Contain no OS calls and no file system access**.
//!
//! # Sub-modules
//!
//! - **`display_service`** – The trait the OS display backends implement.
//! - **`config_repository`** – The trait the config file store implements.
//! - **`snapshot`** – Captures the live system set from a display service.
//! - **`positioning`** – One use case per mode: list, apply,
//!   compare-and-update, test, save.
//! - **`dispatch`** – Maps the selected [`dispatch::Mode`] to its use case.

pub mod config_repository;
pub mod dispatch;
pub mod display_service;
pub mod positioning;
pub mod snapshot;
