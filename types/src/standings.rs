//! The two participants of a ledger and the debt queue they share.

use std::fmt;

use thiserror::Error;

use crate::{DebtQueue, InvalidArgument, Participant, ParticipantId, PushupCount};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not find participant '{0}'")]
pub struct UnknownParticipant(pub String);

/// Why a balance update was refused. Nothing changes in either case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error(transparent)]
    UnknownParticipant(#[from] UnknownParticipant),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

/// How a completed batch of push-ups was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Completion {
    pub punishments: u32,
    pub normals: u32,
}

/// Exactly two participants in a fixed first/second order, plus one shared
/// [`DebtQueue`].
///
/// Invariants: the ids differ, and the queue carrier (if any) is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    first: Participant,
    second: Participant,
    normals: DebtQueue,
}

impl Standings {
    /// Two fresh participants with an empty queue.
    pub fn new(first: Participant, second: Participant) -> Result<Self, InvalidArgument> {
        if first.id() == second.id() {
            return Err(InvalidArgument::DuplicateId(first.id().clone()));
        }
        Ok(Self {
            first,
            second,
            normals: DebtQueue::new(),
        })
    }

    pub fn restore(
        first: Participant,
        second: Participant,
        normals: DebtQueue,
    ) -> Result<Self, RestoreError> {
        let mut standings = Self::new(first, second)?;
        if let Some(carrier) = normals.carrier()
            && carrier != standings.first.id()
            && carrier != standings.second.id()
        {
            return Err(RestoreError::UnknownCarrier(carrier.clone()));
        }
        standings.normals = normals;
        Ok(standings)
    }

    #[must_use]
    pub fn first(&self) -> &Participant {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Participant {
        &self.second
    }

    #[must_use]
    pub fn debt_queue(&self) -> &DebtQueue {
        &self.normals
    }

    pub fn participant(&self, id: &str) -> Result<&Participant, UnknownParticipant> {
        if self.first.id() == id {
            Ok(&self.first)
        } else if self.second.id() == id {
            Ok(&self.second)
        } else {
            Err(UnknownParticipant(id.to_string()))
        }
    }

    fn participant_mut(&mut self, id: &str) -> Result<&mut Participant, UnknownParticipant> {
        if self.first.id() == id {
            Ok(&mut self.first)
        } else if self.second.id() == id {
            Ok(&mut self.second)
        } else {
            Err(UnknownParticipant(id.to_string()))
        }
    }

    pub fn opposite(&self, id: &str) -> Result<&ParticipantId, UnknownParticipant> {
        if self.first.id() == id {
            Ok(self.second.id())
        } else if self.second.id() == id {
            Ok(self.first.id())
        } else {
            Err(UnknownParticipant(id.to_string()))
        }
    }

    pub fn normals_owed(&self, id: &str) -> Result<u32, UnknownParticipant> {
        let participant = self.participant(id)?;
        Ok(self.normals.owed_by(participant.id()))
    }

    pub fn add_normals(&mut self, id: &str, count: PushupCount) -> Result<(), UpdateError> {
        let owner = self.participant(id)?.id().clone();
        self.normals.add_normals(&owner, count)?;
        Ok(())
    }

    pub fn add_punishments(&mut self, id: &str, count: PushupCount) -> Result<(), UpdateError> {
        self.participant_mut(id)?.add_punishments(count)?;
        Ok(())
    }

    /// Applies `count` completed blocks: punishments are paid first, then the
    /// participant's own normal debt.
    pub fn complete_pushups(
        &mut self,
        id: &str,
        count: PushupCount,
    ) -> Result<Completion, UnknownParticipant> {
        let participant = self.participant_mut(id)?;
        let before = participant.punishments();
        let leftover = participant.retire_punishments(count.get());
        let owner = participant.id().clone();
        let punishments = before - participant.punishments();

        let normals = self.normals.retire(&owner, leftover);
        Ok(Completion {
            punishments,
            normals,
        })
    }

    pub fn set_weekend_flag(&mut self, id: &str, flag: bool) -> Result<(), UnknownParticipant> {
        self.participant_mut(id)?.set_weekend_flag(flag);
        Ok(())
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<(), UnknownParticipant> {
        self.participant_mut(id)?.set_name(name);
        Ok(())
    }

    fn describe(&self, participant: &Participant, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if participant.weekend_flag() {
            "does"
        } else {
            "doesn't"
        };
        write!(
            f,
            "{} has to do {} normal and {} punishment push-up blocks and {verb} have a bad weekend",
            participant.name(),
            self.normals.owed_by(participant.id()),
            participant.punishments(),
        )
    }
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(&self.first, f)?;
        f.write_str("; ")?;
        self.describe(&self.second, f)?;
        f.write_str(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error("normal debt belongs to '{0}', who is not a participant")]
    UnknownCarrier(ParticipantId),
}
