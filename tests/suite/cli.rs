//! End-to-end runs of the `gol` binary
//!
//! The calendar is pinned through the config file so results do not depend on
//! the day the tests run.

use gol_core::FixedClock;

use crate::common::Workspace;

#[test]
fn unconfigured_counter_asks_for_config() {
    let ws = Workspace::new();
    ws.write_calendar(false);

    let out = ws.gol_ok(&["table"]);
    assert!(out.contains("gol config"), "{out}");
    assert_eq!(ws.gol_ok(&["audio", "111"]), "");
}

#[test]
fn state_carries_over_between_runs() {
    let ws = Workspace::new();
    ws.write_calendar(false);

    ws.gol_ok(&["config", "Alice", "111", "Bob", "222"]);
    ws.gol_ok(&["flex", "111", "--reply-to", "222"]);
    ws.gol_ok(&["error", "222"]);
    ws.gol_ok(&["punish", "111", "2"]);
    assert_eq!(ws.gol_ok(&["audio", "999"]), "");

    let table = ws.gol_ok(&["table"]);
    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows[3], "|    Normals|    0     |    1     |");
    assert_eq!(rows[4], "|Punishments|    2     |    0     |");
}

#[test]
fn special_days_come_from_the_config() {
    let ws = Workspace::new();
    ws.write_calendar(true);

    ws.gol_ok(&["config", "Alice", "111", "Bob", "222"]);
    ws.gol_ok(&["weekend", "111", "true"]);
    ws.gol_ok(&["audio", "111"]);

    let mut ledger = ws.ledger(FixedClock::ordinary());
    ledger.load().unwrap();
    assert_eq!(ledger.normals("222").unwrap(), 2);
    assert!(ledger.participant("111").unwrap().weekend_flag());
}

#[test]
fn broken_save_file_is_treated_as_unconfigured() {
    let ws = Workspace::new();
    ws.write_calendar(false);
    ws.write_save_file("[]");

    let out = ws.gol_ok(&["status"]);
    assert!(out.contains("gol config"), "{out}");

    ws.gol_ok(&["config", "Alice", "111", "Bob", "222"]);
    let out = ws.gol_ok(&["status"]);
    assert!(out.starts_with("Alice has to do 0 normal"), "{out}");
}

#[test]
fn rule_errors_exit_non_zero() {
    let ws = Workspace::new();
    ws.write_calendar(false);
    ws.gol_ok(&["config", "Alice", "111", "Bob", "222"]);

    let output = ws.gol(&["complete", "111", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be positive"));

    let output = ws.gol(&["error", "999"]);
    assert!(!output.status.success());
}

#[test]
fn invalid_calendar_config_fails_fast() {
    let ws = Workspace::new();
    std::fs::write(ws.config_file(), "[calendar]\nspecial_days = [\"caturday\"]\n").unwrap();

    let output = ws.gol(&["table"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("caturday"));
}
