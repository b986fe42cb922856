//! Positioner: one use case per command-line mode.
//!
//! Every mode is a short linear pipeline:
//!
//! ```text
//! load config ─┐
//!              ├─ compare ─ branch ─ apply / report
//! capture ─────┘
//! ```
//!
//! There are no loops and no retries.  The report for the user is written to
//! the `out` sink passed to each method (stdout in the binary, a buffer in
//! tests); fatal conditions are returned as [`PositionerError`] values and
//! only the binary decides the exit status.
//!
//! # Apply policy
//!
//! The identity gate uses the *online* snapshot, while the changes are
//! planned against a fresh *active* snapshot: only active displays can be
//! repositioned.  Config records without an attached display are skipped and
//! attached displays without a config record are left alone.

use std::io::Write;

use positioner_core::{
    compare, ids_match, plan_apply, Comparison, DisplayId, DisplaySet, DisplaySetError,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config_repository::{ConfigRepository, StoreError};
use super::display_service::{DisplayDetails, DisplayScope, DisplayService, DisplayServiceError};
use super::snapshot::{capture, SnapshotError};

/// Column header printed above the `-l` listing.
const LIST_HEADER: &str = "#  Display_ID   Display_ID   Resolution   Display_Origin   \
                           _____Display_Bounds_____    Rotation   Details";

/// Column header printed above the divergence rows of the `-t` report.
const DIVERGENCE_HEADER: &str = "Display_ID, Config_X, Config_Y, Display_X, Display_Y";

/// Error type for all positioner use cases.
#[derive(Debug, Error)]
pub enum PositionerError {
    /// Reading, parsing or writing the config file failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Querying the displays failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// The config file and the live system describe different displays.
    #[error("config file has {config_count} monitors, system has {system_count}, can't continue")]
    IdentityMismatch {
        config_count: usize,
        system_count: usize,
    },

    /// The platform refused to move a display.
    #[error("failed to set origin of display {id}: {source}")]
    Apply {
        id: DisplayId,
        #[source]
        source: DisplayServiceError,
    },

    /// The report could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// How the `-t` / `-p` comparison reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// Sentences plus a divergence table.
    Human,
    /// The bare literal `true` or `false`, no trailing newline.
    Machine,
}

/// Runs the positioning use cases against a display service and a config
/// repository.
pub struct Positioner<'a> {
    displays: &'a dyn DisplayService,
    config: &'a dyn ConfigRepository,
    max_displays: usize,
}

impl<'a> Positioner<'a> {
    /// Creates a positioner that accepts at most `max_displays` displays in
    /// either set.
    pub fn new(
        displays: &'a dyn DisplayService,
        config: &'a dyn ConfigRepository,
        max_displays: usize,
    ) -> Self {
        Self {
            displays,
            config,
            max_displays,
        }
    }

    /// Prints every online display and the cursor position (`-l`).
    ///
    /// # Errors
    ///
    /// Returns [`PositionerError::Snapshot`] if the displays cannot be listed.
    pub fn list(&self, out: &mut dyn Write) -> Result<(), PositionerError> {
        let details = self.displays.describe().map_err(SnapshotError::from)?;
        if details.len() > self.max_displays {
            let too_many = DisplaySetError::TooManyDisplays {
                count: details.len(),
                max: self.max_displays,
            };
            return Err(SnapshotError::from(too_many).into());
        }

        writeln!(out, "{LIST_HEADER}")?;
        for d in &details {
            writeln!(out, "{}", listing_row(d))?;
        }

        if let Some((x, y)) = self.displays.cursor_location() {
            writeln!(out, "Mouse Cursor Position:  ( {x:5.0} , {y:5.0} )")?;
        }
        Ok(())
    }

    /// Applies the config to the system unconditionally (`-a`).
    ///
    /// # Errors
    ///
    /// Returns [`PositionerError::IdentityMismatch`] when the attached
    /// displays differ from the saved ones, plus any load, query or apply
    /// failure.
    pub fn apply(&self, out: &mut dyn Write) -> Result<(), PositionerError> {
        let (config, system) = self.load_and_capture()?;

        if !ids_match(&config, &system) {
            return Err(PositionerError::IdentityMismatch {
                config_count: config.len(),
                system_count: system.len(),
            });
        }

        self.apply_config(&config, out)?;
        writeln!(out, "Display settings have been applied.")?;
        Ok(())
    }

    /// Applies the config only when the displays match and have drifted (`-c`).
    ///
    /// An identity mismatch is reported but is not an error.
    ///
    /// # Errors
    ///
    /// Returns any load, query or apply failure.
    pub fn compare_and_update(&self, out: &mut dyn Write) -> Result<(), PositionerError> {
        let (config, system) = self.load_and_capture()?;

        match compare(&config, &system) {
            Comparison::IdentityMismatch {
                config_count,
                system_count,
            } => {
                warn!(config_count, system_count, "display set changed; leaving arrangement alone");
                writeln!(
                    out,
                    "Config file has {config_count} monitors, system has {system_count}, not updating."
                )?;
            }
            Comparison::Match => {
                writeln!(out, "Monitor values match, not updating.")?;
            }
            Comparison::Diverged(divergences) => {
                info!(diverged = divergences.len(), "display origins drifted; restoring");
                writeln!(out, "Monitor values differ, updating.")?;
                self.apply_config(&config, out)?;
            }
        }
        Ok(())
    }

    /// Compares without changing anything (`-t` / `-p`).
    ///
    /// # Errors
    ///
    /// Returns any load or query failure.
    pub fn test(&self, style: ReportStyle, out: &mut dyn Write) -> Result<(), PositionerError> {
        let comparison = self.comparison()?;

        match style {
            ReportStyle::Machine => {
                write!(out, "{}", comparison == Comparison::Match)?;
            }
            ReportStyle::Human => write_human_report(&comparison, out)?,
        }
        Ok(())
    }

    /// Returns `true` when the attached displays sit exactly at the saved
    /// origins.
    ///
    /// # Errors
    ///
    /// Returns any load or query failure.
    pub fn check(&self) -> Result<bool, PositionerError> {
        Ok(self.comparison()? == Comparison::Match)
    }

    /// Saves the live arrangement as the new config (`-s`).
    ///
    /// # Errors
    ///
    /// Returns any query or write failure.
    pub fn save(&self, out: &mut dyn Write) -> Result<(), PositionerError> {
        let snapshot = capture(self.displays, DisplayScope::Online, self.max_displays)?;
        self.config.save(&snapshot)?;
        info!(count = snapshot.len(), "saved display arrangement");
        writeln!(out, "Stored {} display settings to config.", snapshot.len())?;
        Ok(())
    }

    fn comparison(&self) -> Result<Comparison, PositionerError> {
        let (config, system) = self.load_and_capture()?;
        Ok(compare(&config, &system))
    }

    fn load_and_capture(&self) -> Result<(DisplaySet, DisplaySet), PositionerError> {
        let config = self.config.load()?;
        let system = capture(self.displays, DisplayScope::Online, self.max_displays)?;
        debug!(config = config.len(), system = system.len(), "loaded config and system sets");
        Ok((config, system))
    }

    fn apply_config(&self, config: &DisplaySet, out: &mut dyn Write) -> Result<(), PositionerError> {
        let active = capture(self.displays, DisplayScope::Active, self.max_displays)?;

        for change in plan_apply(config, &active) {
            writeln!(
                out,
                "{} - setting display to origin \t{} \t{}",
                change.id, change.x, change.y
            )?;
            self.displays
                .set_origin(change.id, change.x, change.y)
                .map_err(|source| PositionerError::Apply {
                    id: change.id,
                    source,
                })?;
        }
        Ok(())
    }
}

fn write_human_report(comparison: &Comparison, out: &mut dyn Write) -> std::io::Result<()> {
    match comparison {
        Comparison::IdentityMismatch {
            config_count,
            system_count,
        } => writeln!(
            out,
            "Config file has {config_count} monitors, system has {system_count}, would not update."
        ),
        Comparison::Match => writeln!(out, "Monitor values match, would not update."),
        Comparison::Diverged(divergences) => {
            writeln!(out, "Monitor values differ, would update.")?;
            writeln!(out, "{DIVERGENCE_HEADER}")?;
            for d in divergences {
                writeln!(out, "{d}")?;
            }
            Ok(())
        }
    }
}

fn listing_row(d: &DisplayDetails) -> String {
    format!(
        "{:<2} 0x{:<10x} {}    {:>4}x{:<4}    {:>5} {:>5}      {:>5} {:>5} {:>5} {:>5}   {:>3.0}          {}{}{}",
        d.unit_number,
        d.id,
        d.id,
        d.width,
        d.height,
        d.x,
        d.y,
        d.x,
        d.y,
        d.right(),
        d.bottom(),
        d.rotation,
        if d.is_active { "" } else { "[inactive]" },
        if d.is_main { "[main]" } else { "" },
        if d.is_builtin { "[internal]" } else { "" },
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
