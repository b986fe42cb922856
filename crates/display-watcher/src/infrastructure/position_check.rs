//! Adapts display-positioner's [`Positioner`] to [`PositionCheck`].
//!
//! The watcher asks the same question as `display-positioner -p`, in process
//! instead of by parsing the literal `true` / `false` from a child process.

use display_positioner::application::positioning::{Positioner, PositionerError};

use crate::application::watch::PositionCheck;

impl PositionCheck for Positioner<'_> {
    fn positions_correct(&self) -> Result<bool, PositionerError> {
        self.check()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
