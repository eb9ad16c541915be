//! Shared test utilities and fixtures
//!
//! Every fixture owns a temp directory holding the save file, the config file
//! and the log directory, so tests never touch the real home directory.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use gol_core::{CounterStore, FixedClock, Ledger};
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn save_file(&self) -> PathBuf {
        self.dir.path().join("data").join("push_ups_save.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn store(&self) -> CounterStore {
        CounterStore::new(self.save_file())
    }

    pub fn ledger(&self, clock: FixedClock) -> Ledger<FixedClock> {
        Ledger::new(self.store(), clock)
    }

    /// A ledger already configured with Alice (111) and Bob (222).
    pub fn alice_and_bob(&self, clock: FixedClock) -> Ledger<FixedClock> {
        let mut ledger = self.ledger(clock);
        ledger
            .configure("Alice", "111", "Bob", "222")
            .expect("configure");
        ledger
    }

    pub fn write_save_file(&self, contents: &str) {
        let path = self.save_file();
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, contents).expect("write save file");
    }

    /// Pins the calendar for the binary: every day special, or none.
    pub fn write_calendar(&self, always_special: bool) {
        let days = if always_special {
            r#"["mon", "tue", "wed", "thu", "fri", "sat", "sun"]"#
        } else {
            "[]"
        };
        std::fs::write(
            self.config_file(),
            format!("[calendar]\nspecial_days = {days}\n"),
        )
        .expect("write config");
    }

    /// Runs the `gol` binary against this workspace.
    pub fn gol(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gol"))
            .args(args)
            .env("GOL_CONFIG", self.config_file())
            .env("GOL_SAVE_FILE", self.save_file())
            .env("RUST_LOG", "debug")
            .current_dir(self.dir.path())
            .output()
            .expect("run gol")
    }

    /// Runs `gol` and returns stdout, failing the test on a non-zero exit.
    pub fn gol_ok(&self, args: &[&str]) -> String {
        let output = self.gol(args);
        assert!(
            output.status.success(),
            "gol {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("utf8 stdout")
    }
}
