//! Integration tests for the watch run.
//!
//! Wires `WatchUseCase` to the real `Positioner` (over `MockDisplayService`
//! and a config file in a temporary directory), the file-backed history and
//! the dry-run rebooter, then plays several boots in a row.

use std::path::Path;

use display_positioner::application::positioning::Positioner;
use display_positioner::infrastructure::display::mock::MockDisplayService;
use display_positioner::infrastructure::storage::config_store::FileConfigStore;
use display_watcher::application::watch::{RebootHistory, WatchOutcome, WatchUseCase};
use display_watcher::infrastructure::history::FileRebootHistory;
use display_watcher::infrastructure::reboot::DryRunRebooter;
use positioner_core::{DisplayRecord, DEFAULT_MAX_DISPLAYS};

const MAX_REBOOTS: u32 = 2;

fn boot(displays: &MockDisplayService, config: &Path, history: &FileRebootHistory) -> WatchOutcome {
    let store = FileConfigStore::new(config, DEFAULT_MAX_DISPLAYS);
    let positioner = Positioner::new(displays, &store, DEFAULT_MAX_DISPLAYS);
    let rebooter = DryRunRebooter::new(vec!["shutdown".to_string(), "-r".to_string(), "now".to_string()]);
    WatchUseCase::new(&positioner, history, &rebooter, MAX_REBOOTS)
        .run()
        .expect("watch run")
}

#[test]
fn test_shuffled_displays_reboot_until_limit_then_give_up() {
    // Arrange
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("display.positioner.config");
    std::fs::write(&config, "1, 0, 0\n2, 1920, 0\n").expect("seed config");
    let history = FileRebootHistory::new(dir.path().join("displaywatcher.history"));
    let shuffled = MockDisplayService::new(vec![
        DisplayRecord::new(1, 1920, 0),
        DisplayRecord::new(2, 0, 0),
    ]);

    // Act / Assert: two reboots, then give up and reset
    assert_eq!(boot(&shuffled, &config, &history), WatchOutcome::Rebooted { attempt: 1 });
    assert_eq!(boot(&shuffled, &config, &history), WatchOutcome::Rebooted { attempt: 2 });
    assert_eq!(boot(&shuffled, &config, &history), WatchOutcome::GaveUp { attempts: 2 });
    assert_eq!(history.previous_reboots().expect("history"), 0);

    // The watcher never moves displays itself
    assert!(shuffled.applied_changes().is_empty());
}

#[test]
fn test_correct_boot_after_a_reboot_resets_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("display.positioner.config");
    std::fs::write(&config, "1, 0, 0\n").expect("seed config");
    let history = FileRebootHistory::new(dir.path().join("displaywatcher.history"));

    let wrong = MockDisplayService::new(vec![DisplayRecord::new(1, 100, 0)]);
    let right = MockDisplayService::new(vec![DisplayRecord::new(1, 0, 0)]);

    assert_eq!(boot(&wrong, &config, &history), WatchOutcome::Rebooted { attempt: 1 });
    assert_eq!(boot(&right, &config, &history), WatchOutcome::Healthy);
    assert_eq!(history.previous_reboots().expect("history"), 0);
}

#[test]
fn test_missing_config_is_an_error_and_leaves_history_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    let history = FileRebootHistory::new(dir.path().join("displaywatcher.history"));
    history.record(1).expect("seed history");
    let displays = MockDisplayService::new(vec![DisplayRecord::new(1, 0, 0)]);
    let store = FileConfigStore::new(dir.path().join("absent"), DEFAULT_MAX_DISPLAYS);
    let positioner = Positioner::new(&displays, &store, DEFAULT_MAX_DISPLAYS);
    let rebooter = DryRunRebooter::new(Vec::new());

    let result = WatchUseCase::new(&positioner, &history, &rebooter, MAX_REBOOTS).run();

    assert!(result.is_err());
    assert_eq!(history.previous_reboots().expect("history"), 1);
}
