use crate::{InvalidArgument, MAX_BLOCKS, ParticipantId, PushupCount};

/// One of the two people tracked by a ledger.
///
/// Normal debt is not stored here: it lives in the [`DebtQueue`](crate::DebtQueue)
/// shared by both participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    punishments: u32,
    weekend_flag: bool,
}

impl Participant {
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            punishments: 0,
            weekend_flag: false,
        }
    }

    /// Rebuilds a participant from persisted fields.
    #[must_use]
    pub fn restore(
        id: ParticipantId,
        name: impl Into<String>,
        punishments: u32,
        weekend_flag: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            punishments,
            weekend_flag,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn punishments(&self) -> u32 {
        self.punishments
    }

    /// "RIP weekend": whether voice messages on special days cost this participant.
    #[must_use]
    pub fn weekend_flag(&self) -> bool {
        self.weekend_flag
    }

    pub fn set_weekend_flag(&mut self, flag: bool) {
        self.weekend_flag = flag;
    }

    /// Refuses a total above [`MAX_BLOCKS`] without changing the counter.
    pub fn add_punishments(&mut self, count: PushupCount) -> Result<(), InvalidArgument> {
        let total = u64::from(self.punishments) + u64::from(count.get());
        if total > u64::from(MAX_BLOCKS) {
            return Err(InvalidArgument::CountTooLarge(total as i64));
        }
        self.punishments = total as u32;
        Ok(())
    }

    /// Pays punishment blocks first and returns what is left of `units`.
    pub(crate) fn retire_punishments(&mut self, units: u32) -> u32 {
        if self.punishments > units {
            self.punishments -= units;
            0
        } else {
            let left = units - self.punishments;
            self.punishments = 0;
            left
        }
    }
}
