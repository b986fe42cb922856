//! Display Positioner — entry point.
//!
//! Saves the origin of every attached display to a small text file and puts
//! the displays back there later, typically after the operating system has
//! shuffled a multi-monitor arrangement on wake or reboot.
//!
//! # Usage
//!
//! ```text
//! display-positioner <-l|-a|-c|-t|-p|-s> [OPTIONS]
//!
//! Modes (exactly one):
//!   -l   list displays and the cursor position
//!   -a   apply the saved arrangement (fails if the displays differ)
//!   -c   apply only if the displays match and have moved
//!   -t   compare and explain, never changes anything
//!   -p   compare and print `true` or `false`, never changes anything
//!   -s   save the current arrangement
//!
//! Options:
//!   --config <PATH>        config file [default: <data dir>/display.positioner.config]
//!   --max-displays <N>     display limit [default: 16]
//! ```
//!
//! Exit status is 0 on success and 1 on a usage error or any fatal error.
//! Diagnostics and logs go to stderr; stdout carries only the mode's report.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use display_positioner::application::dispatch::{dispatch, Mode};
use display_positioner::application::positioning::Positioner;
use display_positioner::infrastructure::display::NativeDisplayService;
use display_positioner::infrastructure::storage::{
    config_store::FileConfigStore,
    paths,
    settings::{load_settings, PositionerSettings, SettingsError},
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Saves, checks and restores the origin of every attached display.
#[derive(Debug, Parser)]
#[command(name = "display-positioner", version)]
struct Cli {
    #[command(flatten)]
    mode: ModeFlags,

    /// Config file to read and write instead of the one in the data directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of displays accepted in the config or from the system.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    max_displays: Option<u16>,
}

/// The six mode flags; exactly one must be given.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ModeFlags {
    /// List displays and the mouse cursor position.
    #[arg(short = 'l')]
    list: bool,

    /// Apply the saved arrangement; fails if the attached displays differ.
    #[arg(short = 'a')]
    apply: bool,

    /// Apply the saved arrangement only if the displays match and have moved.
    #[arg(short = 'c')]
    compare: bool,

    /// Compare and explain the differences without changing anything.
    #[arg(short = 't')]
    test: bool,

    /// Compare and print `true` or `false` without changing anything.
    #[arg(short = 'p')]
    programmatic: bool,

    /// Save the current arrangement as the new config.
    #[arg(short = 's')]
    save: bool,
}

impl ModeFlags {
    fn selected(&self) -> Option<Mode> {
        [
            (self.list, Mode::List),
            (self.apply, Mode::Apply),
            (self.compare, Mode::CompareAndUpdate),
            (self.test, Mode::Test),
            (self.programmatic, Mode::ProgrammaticTest),
            (self.save, Mode::Save),
        ]
        .into_iter()
        .find_map(|(set, mode)| set.then_some(mode))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; everything else is a
            // usage error.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match load_settings() {
        Err(SettingsError::NoDataDir(_)) => PositionerSettings::default(),
        other => other?,
    };

    // Logs go to stderr so that `-p` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(mode) = cli.mode.selected() else {
        anyhow::bail!("no mode selected");
    };

    let config_path = match cli.config {
        Some(path) => path,
        None => paths::config_file_path()?,
    };
    let max_displays = cli
        .max_displays
        .map_or(settings.max_displays, usize::from);
    debug!(config = %config_path.display(), max_displays, "starting");

    let displays = NativeDisplayService::new();
    let store = FileConfigStore::new(config_path, max_displays);
    let positioner = Positioner::new(&displays, &store, max_displays);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = dispatch(mode, &positioner, &mut out);
    out.flush().context("failed to flush stdout")?;
    result?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
