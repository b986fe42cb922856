//! Mode dispatch: maps the one selected command-line mode to its use case.

use std::io::Write;

use tracing::debug;

use super::positioning::{Positioner, PositionerError, ReportStyle};

/// The operating mode selected on the command line.  Exactly one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `-l`: list displays and the cursor position.
    List,
    /// `-a`: apply the config unconditionally.
    Apply,
    /// `-c`: apply the config only if the displays drifted.
    CompareAndUpdate,
    /// `-t`: compare and explain.
    Test,
    /// `-p`: compare and print `true` / `false`.
    ProgrammaticTest,
    /// `-s`: save the live arrangement.
    Save,
}

/// Runs the use case for `mode`, writing its report to `out`.
///
/// # Errors
///
/// Returns whatever the use case returns.
pub fn dispatch(
    mode: Mode,
    positioner: &Positioner<'_>,
    out: &mut dyn Write,
) -> Result<(), PositionerError> {
    debug!(?mode, "dispatching");
    match mode {
        Mode::List => positioner.list(out),
        Mode::Apply => positioner.apply(out),
        Mode::CompareAndUpdate => positioner.compare_and_update(out),
        Mode::Test => positioner.test(ReportStyle::Human, out),
        Mode::ProgrammaticTest => positioner.test(ReportStyle::Machine, out),
        Mode::Save => positioner.save(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config_repository::MockConfigRepository;
    use crate::infrastructure::display::mock::MockDisplayService;
    use positioner_core::{DisplayRecord, DisplaySet, DEFAULT_MAX_DISPLAYS};

    fn saved(records: Vec<DisplayRecord>) -> MockConfigRepository {
        let set = DisplaySet::new(records, DEFAULT_MAX_DISPLAYS).expect("valid set");
        let mut repo = MockConfigRepository::new();
        repo.expect_load().returning(move || Ok(set.clone()));
        repo
    }

    #[test]
    fn test_programmatic_test_and_save_are_independent_modes() {
        // Arrange
        let displays = MockDisplayService::new(vec![DisplayRecord::new(1, 0, 0)]);
        let mut config = saved(vec![DisplayRecord::new(1, 0, 0)]);
        config.expect_save().never();
        let positioner = Positioner::new(&displays, &config, DEFAULT_MAX_DISPLAYS);
        let mut out = Vec::new();

        // Act
        dispatch(Mode::ProgrammaticTest, &positioner, &mut out).expect("dispatch");

        // Assert: no save happened and the output is only the literal
        assert_eq!(out, b"true");
    }

    #[test]
    fn test_test_mode_never_moves_displays() {
        let displays = MockDisplayService::new(vec![DisplayRecord::new(1, 100, 50)]);
        let config = saved(vec![DisplayRecord::new(1, 0, 0)]);
        let positioner = Positioner::new(&displays, &config, DEFAULT_MAX_DISPLAYS);
        let mut out = Vec::new();

        dispatch(Mode::Test, &positioner, &mut out).expect("dispatch");

        assert!(displays.applied_changes().is_empty());
    }

    #[test]
    fn test_apply_mode_moves_displays() {
        let displays = MockDisplayService::new(vec![DisplayRecord::new(1, 100, 50)]);
        let config = saved(vec![DisplayRecord::new(1, 0, 0)]);
        let positioner = Positioner::new(&displays, &config, DEFAULT_MAX_DISPLAYS);
        let mut out = Vec::new();

        dispatch(Mode::Apply, &positioner, &mut out).expect("dispatch");

        assert_eq!(displays.origins(), vec![DisplayRecord::new(1, 0, 0)]);
    }
}
