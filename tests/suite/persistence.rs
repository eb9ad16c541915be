//! Save/load behaviour of the counter file

use gol_core::{FixedClock, LedgerError};

use crate::common::Workspace;

#[test]
fn save_then_load_restores_every_field() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::special());
    ledger.add_pushups("222", "111").unwrap();
    ledger.add_punishments("111", 4).unwrap();
    ledger.set_weekend_flag("222", true).unwrap();
    ledger.rename("111", "Alicia").unwrap();
    ledger.save().unwrap();

    let mut restored = ws.ledger(FixedClock::special());
    restored.load().unwrap();

    assert_eq!(restored.standings(), ledger.standings());
    for id in ["111", "222"] {
        let before = ledger.participant(id).unwrap();
        let after = restored.participant(id).unwrap();
        assert_eq!(after.name(), before.name());
        assert_eq!(after.punishments(), before.punishments());
        assert_eq!(after.weekend_flag(), before.weekend_flag());
        assert_eq!(
            restored.normals(id).unwrap(),
            ledger.normals(id).unwrap()
        );
    }
    assert_eq!(restored.normals("222").unwrap(), 2);
}

#[test]
fn saved_record_has_the_documented_shape() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.add_pushups("111", "222").unwrap();

    let raw = std::fs::read_to_string(ws.save_file()).unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = record.as_object().unwrap();

    assert_eq!(object.len(), 3);
    assert_eq!(record["111"]["name"], "Alice");
    assert_eq!(record["111"]["rip_wknd"], false);
    assert_eq!(record["222"]["punishments"], 0);
    assert_eq!(record["normals"], serde_json::json!(["111"]));
}

#[test]
fn unknown_normals_id_leaves_an_unconfigured_ledger_alone() {
    let ws = Workspace::new();
    ws.write_save_file(
        r#"{
            "111": {"name": "Alice", "rip_wknd": false, "punishments": 0},
            "222": {"name": "Bob", "rip_wknd": false, "punishments": 0},
            "normals": ["333"]
        }"#,
    );

    let mut ledger = ws.ledger(FixedClock::ordinary());
    let err = ledger.load().unwrap_err();

    assert!(matches!(err, LedgerError::WrongCounterFileFormat(_)));
    assert!(!ledger.is_configured());
}

#[test]
fn failed_load_keeps_the_previous_state() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::ordinary());
    ledger.add_normals("222", 3).unwrap();
    let before = ledger.standings().cloned();

    ws.write_save_file(r#"{"111": {"name": "Alice", "rip_wknd": false, "punishments": 0}, "normals": []}"#);
    let err = ledger.load().unwrap_err();

    assert!(matches!(err, LedgerError::WrongCounterFileFormat(_)));
    assert_eq!(ledger.standings().cloned(), before);
    assert_eq!(ledger.normals("222").unwrap(), 3);
}

#[test]
fn garbage_is_a_format_error_not_an_io_error() {
    let ws = Workspace::new();
    ws.write_save_file("{ this is not json");

    let mut ledger = ws.ledger(FixedClock::ordinary());
    assert!(matches!(
        ledger.load().unwrap_err(),
        LedgerError::WrongCounterFileFormat(_)
    ));
}

#[test]
fn missing_file_surfaces_as_io() {
    let ws = Workspace::new();
    let mut ledger = ws.ledger(FixedClock::ordinary());

    assert!(matches!(ledger.load().unwrap_err(), LedgerError::Io(_)));
    assert!(!ledger.is_configured());
}

#[test]
fn configure_overwrites_a_previous_record() {
    let ws = Workspace::new();
    let mut ledger = ws.alice_and_bob(FixedClock::special());
    ledger.add_pushups("111", "222").unwrap();

    ledger.configure("Carol", "333", "Dave", "444").unwrap();

    let mut restored = ws.ledger(FixedClock::special());
    restored.load().unwrap();
    assert_eq!(restored.participant("333").unwrap().name(), "Carol");
    assert!(matches!(
        restored.participant("111").unwrap_err(),
        LedgerError::ParticipantNotFound(_)
    ));
    assert_eq!(restored.normals("333").unwrap(), 0);
}
