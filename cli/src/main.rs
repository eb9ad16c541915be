//! gol - command-line front end for the two-person push-up counter.
//!
//! Every invocation is one event:
//!
//! ```text
//! main() -> load config -> Ledger::from_config -> restore save file -> run(command)
//! ```
//!
//! The ledger persists after each successful rule, so state carries over
//! between invocations through the save file alone.

mod commands;

use std::{
    fs::{self, OpenOptions},
    io::{self, ErrorKind},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::Command;
use gol_config::GolConfig;
use gol_core::{ClockOracle, Ledger, LedgerError};

#[derive(Debug, Parser)]
#[command(name = "gol")]
#[command(about = "Keep track of the push-ups two people owe each other", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_gol_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::debug!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: keep stdout for replies and only surface warnings.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::new("warn"))
        .init();
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_gol_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in gol_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn gol_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: next to the config file (~/.gol/logs/gol.log)
    if let Some(config_path) = GolConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("gol.log"));
    }

    // Fallback: ./.gol/logs/gol.log
    candidates.push(PathBuf::from(".gol").join("logs").join("gol.log"));

    candidates
}

/// Brings back the saved counter, if any. A missing or broken file leaves the
/// ledger unconfigured so that `gol config` can start over.
fn restore<C: ClockOracle>(ledger: &mut Ledger<C>) {
    match ledger.load() {
        Ok(()) => {}
        Err(LedgerError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(
                path = %ledger.store().path().display(),
                "No saved counter yet"
            );
        }
        Err(err) => {
            tracing::error!(
                path = %ledger.store().path().display(),
                "Couldn't load the counter file, configure the counter: {err}"
            );
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = GolConfig::load().ok().flatten().unwrap_or_default();
    let mut ledger = Ledger::from_config(&config)?;
    restore(&mut ledger);

    let stdout = io::stdout();
    commands::run(cli.command, &mut ledger, &mut stdout.lock())
}
