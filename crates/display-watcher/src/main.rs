//! Display Watcher — entry point.
//!
//! Run once at login or boot.  Checks whether the attached displays sit at
//! the origins saved by `display-positioner -s` and reboots the machine if
//! they do not, at most `max_reboots` times in a row.
//!
//! # Usage
//!
//! ```text
//! display-watcher [OPTIONS]
//!
//! Options:
//!   --settings <PATH>   settings file [default: <data dir>/display.watcher.toml]
//!   --dry-run           log the reboot instead of running the reboot command
//! ```
//!
//! Exit status is 0 whether the arrangement was correct, a reboot was
//! requested or the watcher gave up; 1 on any error, including a bad
//! command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use display_positioner::application::positioning::Positioner;
use display_positioner::infrastructure::display::NativeDisplayService;
use display_positioner::infrastructure::storage::{config_store::FileConfigStore, paths};
use display_watcher::application::watch::{Rebooter, WatchOutcome, WatchUseCase};
use display_watcher::infrastructure::history::FileRebootHistory;
use display_watcher::infrastructure::reboot::{CommandRebooter, DryRunRebooter};
use display_watcher::infrastructure::settings::{load_watcher_settings, load_watcher_settings_from};

/// Reboots until the saved display arrangement comes back.
#[derive(Debug, Parser)]
#[command(name = "display-watcher", version)]
struct Cli {
    /// Settings file to use instead of the one in the data directory.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log the reboot instead of running the reboot command.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(outcome) => {
            info!(?outcome, "display watcher finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<WatchOutcome> {
    let settings = match &cli.settings {
        Some(path) => load_watcher_settings_from(path)?,
        None => load_watcher_settings()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match settings.config_file.clone() {
        Some(path) => path,
        None => paths::config_file_path()?,
    };

    let displays = NativeDisplayService::new();
    let store = FileConfigStore::new(config_path, settings.max_displays);
    let positioner = Positioner::new(&displays, &store, settings.max_displays);
    let history = FileRebootHistory::new(settings.history_file.clone());

    let rebooter: Box<dyn Rebooter> = if cli.dry_run {
        Box::new(DryRunRebooter::new(settings.reboot_command.clone()))
    } else {
        Box::new(CommandRebooter::new(settings.reboot_command.clone()))
    };

    let watch = WatchUseCase::new(&positioner, &history, rebooter.as_ref(), settings.max_reboots);
    Ok(watch.run()?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
