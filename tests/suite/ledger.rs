//! Rule behaviour through the public ledger API

use gol_core::{FixedClock, LedgerError};
use gol_types::{InvalidArgument, MAX_BLOCKS};
use insta::assert_snapshot;

use crate::common::Workspace;

#[test]
fn opposite_round_trips_for_both_ids() {
    let ws = Workspace::new();
    let ledger = ws.alice_and_bob(FixedClock::ordinary());

    for id in ["111", "222"] {
        let other = ledger.opposite(id).unwrap();
        assert_eq!(ledger.opposite(other.as_str()).unwrap().as_str(), id);
    }
    assert!(matches!(
        ledger.opposite("unknown").unwrap_err(),
        LedgerError::ParticipantNotFound(_)
    ));
}

#[test]
fn equal_normals_cancel_for_any_amount() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());

    for n in [1, 2, 7, 40] {
        ledger.add_normals("111", n).unwrap();
        ledger.add_normals("222", n).unwrap();
        assert_eq!(ledger.normals("111").unwrap(), 0, "n = {n}");
        assert_eq!(ledger.normals("222").unwrap(), 0, "n = {n}");
        assert!(ledger.standings().unwrap().debt_queue().is_empty());
    }
}

#[test]
fn same_side_normals_accumulate() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.add_normals("111", 3).unwrap();
    ledger.add_normals("111", 2).unwrap();

    assert_eq!(ledger.normals("111").unwrap(), 5);
}

#[test]
fn opposite_normals_net_partially() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.add_normals("111", 3).unwrap();
    ledger.add_normals("222", 2).unwrap();

    assert_eq!(ledger.normals("111").unwrap(), 1);
    assert_eq!(ledger.normals("222").unwrap(), 0);
}

#[test]
fn only_one_side_ever_carries_normals() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::special());

    let events: [(&str, &str); 8] = [
        ("111", "111"),
        ("222", "111"),
        ("222", "222"),
        ("111", "222"),
        ("111", "222"),
        ("222", "111"),
        ("222", "111"),
        ("222", "111"),
    ];
    for (requester, target) in events {
        ledger.add_pushups(requester, target).unwrap();
        let a = ledger.normals("111").unwrap();
        let b = ledger.normals("222").unwrap();
        assert!(a == 0 || b == 0, "both carry debt: {a} / {b}");
    }
}

#[test]
fn special_day_self_report_scenario() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::special());
    ledger.add_pushups("111", "111").unwrap();

    let table = ledger.push_up_table().unwrap();
    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows[1], "            |  Alice   |   Bob    |");
    assert_eq!(rows[3], "|    Normals|    1     |    0     |");
    assert_eq!(rows[4], "|Punishments|    0     |    0     |");
}

#[test]
fn ordinary_day_peer_confirm_scenario() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.add_pushups("111", "222").unwrap();

    assert_eq!(ledger.normals("111").unwrap(), 1);
    assert_eq!(ledger.normals("222").unwrap(), 0);
}

#[test]
fn ordinary_day_self_report_charges_the_other() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.add_pushups("111", "111").unwrap();

    assert_eq!(ledger.normals("111").unwrap(), 0);
    assert_eq!(ledger.normals("222").unwrap(), 1);
}

#[test]
fn error_on_ordinary_day_costs_two() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.process_error("111").unwrap();

    assert_eq!(ledger.normals("111").unwrap(), 2);
}

#[test]
fn audio_is_ignored_on_ordinary_days_even_when_flagged() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.set_weekend_flag("111", true).unwrap();
    ledger.set_weekend_flag("222", true).unwrap();

    assert!(!ledger.process_audio("111").unwrap());
    assert!(!ledger.process_audio("222").unwrap());
    assert!(!ledger.process_audio("999").unwrap());
    assert_eq!(ledger.normals("111").unwrap(), 0);
    assert_eq!(ledger.normals("222").unwrap(), 0);
}

#[test]
fn summary_reads_like_a_sentence() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::special());
    ledger.process_error("222").unwrap();
    ledger.add_punishments("111", 3).unwrap();
    ledger.set_weekend_flag("111", true).unwrap();

    assert_snapshot!(
        ledger.summary().unwrap(),
        @"Alice has to do 0 normal and 3 punishment push-up blocks and does have a bad weekend; Bob has to do 4 normal and 0 punishment push-up blocks and doesn't have a bad weekend."
    );
}

#[test]
fn oversized_amounts_are_refused_and_keep_the_file_small() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());

    assert!(matches!(
        ledger.add_normals("111", 20_000_000).unwrap_err(),
        LedgerError::InvalidArgument(InvalidArgument::CountTooLarge(20_000_000))
    ));
    ledger.add_normals("111", i64::from(MAX_BLOCKS)).unwrap();

    let size = std::fs::metadata(ws.save_file()).unwrap().len();
    assert!(size < 200_000, "save file is {size} bytes");
}
