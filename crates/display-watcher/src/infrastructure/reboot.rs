//! [`Rebooter`] implementations.
//!
//! `CommandRebooter` runs the configured command (by default
//! `shutdown -r now`).  `DryRunRebooter` only logs what would have run and
//! is selected with `--dry-run`.

use std::process::Command;

use tracing::{info, warn};

use crate::application::watch::{RebootError, Rebooter};

/// Runs an external command to reboot the machine.
#[derive(Debug, Clone)]
pub struct CommandRebooter {
    command: Vec<String>,
}

impl CommandRebooter {
    /// Creates a rebooter for `command`; the first element is the program.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Rebooter for CommandRebooter {
    fn reboot(&self) -> Result<(), RebootError> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(RebootError::EmptyCommand);
        };

        info!(program = program.as_str(), ?args, "running reboot command");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| RebootError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RebootError::Failed {
                program: program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Logs the reboot instead of performing it.
#[derive(Debug, Clone)]
pub struct DryRunRebooter {
    command: Vec<String>,
}

impl DryRunRebooter {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Rebooter for DryRunRebooter {
    fn reboot(&self) -> Result<(), RebootError> {
        warn!(command = ?self.command, "dry run: not rebooting");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_rejected() {
        let rebooter = CommandRebooter::new(Vec::new());
        assert!(matches!(rebooter.reboot(), Err(RebootError::EmptyCommand)));
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let rebooter = CommandRebooter::new(vec!["display-watcher-no-such-program".to_string()]);
        assert!(matches!(rebooter.reboot(), Err(RebootError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command_is_ok() {
        let rebooter = CommandRebooter::new(vec!["true".to_string()]);
        rebooter.reboot().expect("`true` must succeed");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_reports_exit_status() {
        let rebooter = CommandRebooter::new(vec!["false".to_string()]);
        assert!(matches!(rebooter.reboot(), Err(RebootError::Failed { .. })));
    }

    #[test]
    fn test_dry_run_never_fails() {
        let rebooter = DryRunRebooter::new(vec!["shutdown".to_string(), "-r".to_string()]);
        rebooter.reboot().expect("dry run");
    }
}
