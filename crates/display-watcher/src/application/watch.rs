//! Watch use case: reboot until the displays come back, within a limit.
//!
//! # Run sequence
//!
//! ```text
//! check positions ─ read history ─ decide ─┬─ Healthy  → history = 0
//!                                          ├─ Rebooted → history = n + 1, reboot
//!                                          └─ GaveUp   → history = 0, warn
//! ```
//!
//! The history is written *before* the reboot command runs, because a
//! successful reboot command may not return.

use std::path::PathBuf;

use display_positioner::application::positioning::PositionerError;
use thiserror::Error;
use tracing::{info, warn};

/// Error type for the reboot history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history file exists but could not be read.
    #[error("unable to read history file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history file does not hold a non-negative integer.
    #[error("history file {path} does not contain a reboot count: {content:?}")]
    Parse { path: PathBuf, content: String },

    /// The history file could not be written.
    #[error("unable to write history file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for rebooting.
#[derive(Debug, Error)]
pub enum RebootError {
    /// The configured reboot command is empty.
    #[error("reboot command is empty")]
    EmptyCommand,

    /// The reboot command could not be started.
    #[error("failed to run reboot command {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The reboot command ran and reported failure.
    #[error("reboot command {program:?} exited with {status}")]
    Failed { program: String, status: String },
}

/// Error type for a watch run.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("display check failed: {0}")]
    Check(#[from] PositionerError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Reboot(#[from] RebootError),
}

/// Whether the displays sit at their saved origins.
#[cfg_attr(test, mockall::automock)]
pub trait PositionCheck {
    /// Returns `true` when the attached displays match the saved config.
    ///
    /// # Errors
    ///
    /// Returns whatever the comparison fails with.
    fn positions_correct(&self) -> Result<bool, PositionerError>;
}

/// Counter of consecutive reboots, persisted between boots.
#[cfg_attr(test, mockall::automock)]
pub trait RebootHistory {
    /// Returns the number of reboots already attempted (0 when none recorded).
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if a stored count cannot be read.
    fn previous_reboots(&self) -> Result<u32, HistoryError>;

    /// Replaces the stored count.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Write`] on failure.
    fn record(&self, count: u32) -> Result<(), HistoryError>;
}

/// Restarts the machine.
#[cfg_attr(test, mockall::automock)]
pub trait Rebooter {
    /// Requests a reboot.
    ///
    /// # Errors
    ///
    /// Returns [`RebootError`] if the request could not be made.
    fn reboot(&self) -> Result<(), RebootError>;
}

/// Result of one watch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The arrangement is correct.
    Healthy,
    /// The arrangement is wrong; reboot attempt number `attempt` was made.
    Rebooted { attempt: u32 },
    /// The arrangement is still wrong after `attempts` reboots; giving up.
    GaveUp { attempts: u32 },
}

/// Decides what to do given the check result and the reboot history.
pub fn decide(correct: bool, previous: u32, max_reboots: u32) -> WatchOutcome {
    if correct {
        WatchOutcome::Healthy
    } else if previous < max_reboots {
        WatchOutcome::Rebooted {
            attempt: previous + 1,
        }
    } else {
        WatchOutcome::GaveUp { attempts: previous }
    }
}

/// One-shot watch run over the three collaborators.
pub struct WatchUseCase<'a> {
    check: &'a dyn PositionCheck,
    history: &'a dyn RebootHistory,
    rebooter: &'a dyn Rebooter,
    max_reboots: u32,
}

impl<'a> WatchUseCase<'a> {
    pub fn new(
        check: &'a dyn PositionCheck,
        history: &'a dyn RebootHistory,
        rebooter: &'a dyn Rebooter,
        max_reboots: u32,
    ) -> Self {
        Self {
            check,
            history,
            rebooter,
            max_reboots,
        }
    }

    /// Checks the displays and acts on the result.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError`] if the check, the history or the reboot fails.
    pub fn run(&self) -> Result<WatchOutcome, WatchError> {
        let correct = self.check.positions_correct()?;
        let previous = self.history.previous_reboots()?;
        let outcome = decide(correct, previous, self.max_reboots);

        match outcome {
            WatchOutcome::Healthy => {
                info!("display positions were correct");
                self.history.record(0)?;
            }
            WatchOutcome::Rebooted { attempt } => {
                info!(
                    previous,
                    max_reboots = self.max_reboots,
                    "display positions incorrect; rebooting"
                );
                self.history.record(attempt)?;
                self.rebooter.reboot()?;
            }
            WatchOutcome::GaveUp { attempts } => {
                warn!(attempts, "display positions still incorrect; giving up");
                self.history.record(0)?;
            }
        }
        Ok(outcome)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
