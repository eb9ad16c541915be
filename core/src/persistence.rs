//! Boundary: the on-disk counter record.
//!
//! The record is a JSON object with one key per participant id plus a
//! `"normals"` list holding the shared debt queue in token form:
//!
//! ```json
//! {
//!     "111": { "name": "Alice", "rip_wknd": false, "punishments": 0 },
//!     "222": { "name": "Bob", "rip_wknd": true, "punishments": 2 },
//!     "normals": ["111", "111"]
//! }
//! ```
//!
//! Key order is significant only for the first/second layout: participants
//! are written in table order and read back in file order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gol_types::{DebtQueue, MAX_BLOCKS, Participant, ParticipantId, Standings};
use gol_utils::{atomic_write, recover_bak_file};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::errors::LedgerError;

/// Key of the debt queue inside the record; no participant may use it as id.
pub const NORMALS_KEY: &str = "normals";

#[derive(Debug, Serialize, Deserialize)]
struct ParticipantRecord {
    name: String,
    #[serde(rename = "rip_wknd", alias = "weekendFlag", alias = "weekend_flag")]
    weekend_flag: bool,
    punishments: u32,
}

impl From<&Participant> for ParticipantRecord {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name().to_string(),
            weekend_flag: participant.weekend_flag(),
            punishments: participant.punishments(),
        }
    }
}

/// The whole record, written straight to the serializer.
struct Record<'a>(&'a Standings);

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        for participant in [self.0.first(), self.0.second()] {
            map.serialize_entry(participant.id().as_str(), &ParticipantRecord::from(participant))?;
        }
        map.serialize_entry(NORMALS_KEY, &Tokens(self.0.debt_queue()))?;
        map.end()
    }
}

/// The queue in token form, one element per block, without collecting it first.
struct Tokens<'a>(&'a DebtQueue);

impl Serialize for Tokens<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len() as usize))?;
        for token in self.0.tokens() {
            seq.serialize_element(token.as_str())?;
        }
        seq.end()
    }
}

/// Owns the location of the counter file.
#[derive(Debug, Clone)]
pub struct CounterStore {
    path: PathBuf,
}

impl CounterStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the whole record.
    pub fn save(&self, standings: &Standings) -> io::Result<()> {
        let bytes = encode(standings)?;
        atomic_write(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), "Counter saved");
        Ok(())
    }

    /// Reads and validates the whole record. Nothing is returned unless every
    /// check passes.
    pub fn load(&self) -> Result<Standings, LedgerError> {
        recover_bak_file(&self.path);
        let raw = fs::read_to_string(&self.path)?;
        let standings = decode(&raw)?;
        tracing::debug!(path = %self.path.display(), "Counter loaded");
        Ok(standings)
    }
}

fn encode(standings: &Standings) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    Record(standings).serialize(&mut serializer)?;
    Ok(out)
}

fn decode(raw: &str) -> Result<Standings, LedgerError> {
    let record: Map<String, Value> = serde_json::from_str(raw)
        .map_err(|e| LedgerError::format(format!("expected a JSON object: {e}")))?;

    let mut normals = None;
    let mut people = Vec::with_capacity(2);
    for (key, value) in record {
        if key == NORMALS_KEY {
            normals = Some(value);
        } else {
            people.push((key, value));
        }
    }

    let normals = normals.ok_or_else(|| LedgerError::format("missing the \"normals\" list"))?;
    if people.len() != 2 {
        return Err(LedgerError::format(format!(
            "there should be exactly two ids in the counter file, found {}",
            people.len()
        )));
    }

    let mut participants = Vec::with_capacity(2);
    for (key, value) in people {
        let id = ParticipantId::new(key)
            .map_err(|e| LedgerError::format(format!("bad participant id: {e}")))?;
        let record: ParticipantRecord = serde_json::from_value(value)
            .map_err(|e| LedgerError::format(format!("bad record for '{id}': {e}")))?;
        if record.punishments > MAX_BLOCKS {
            return Err(LedgerError::format(format!(
                "'{id}' has {} punishments, above the limit of {MAX_BLOCKS}",
                record.punishments
            )));
        }
        participants.push(Participant::restore(
            id,
            record.name,
            record.punishments,
            record.weekend_flag,
        ));
    }

    let tokens: Vec<String> = serde_json::from_value(normals)
        .map_err(|e| LedgerError::format(format!("\"normals\" must be a list of ids: {e}")))?;
    if tokens.len() > MAX_BLOCKS as usize {
        return Err(LedgerError::format(format!(
            "{} normal blocks, above the limit of {MAX_BLOCKS}",
            tokens.len()
        )));
    }
    let mut queue_tokens = Vec::with_capacity(tokens.len());
    for token in tokens {
        let Some(participant) = participants.iter().find(|p| *p.id() == *token) else {
            return Err(LedgerError::format(format!(
                "the normals list references unknown id '{token}'"
            )));
        };
        queue_tokens.push(participant.id().clone());
    }
    let queue =
        DebtQueue::from_tokens(queue_tokens).map_err(|e| LedgerError::format(e.to_string()))?;

    let mut participants = participants.into_iter();
    let (Some(first), Some(second)) = (participants.next(), participants.next()) else {
        return Err(LedgerError::format("there should be exactly two ids"));
    };
    Standings::restore(first, second, queue).map_err(|e| LedgerError::format(e.to_string()))
}
