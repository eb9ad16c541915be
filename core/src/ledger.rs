//! The two-participant rules engine.
//!
//! A [`Ledger`] starts unconfigured. Every rule except `configure` and `load`
//! requires the configured state and fails with
//! [`LedgerError::NotConfigured`] otherwise. Successful mutations are written
//! back to the [`CounterStore`] when autosave is on.

use gol_config::GolConfig;
use gol_types::{
    Completion, InvalidArgument, Participant, ParticipantId, PushupCount, Standings,
};

use crate::clock::{ClockOracle, InvalidWeekday, SystemClock};
use crate::errors::LedgerError;
use crate::persistence::{CounterStore, NORMALS_KEY};
use crate::table::render_table;

/// Units owed for a self-report or an ordinary-day peer report.
const SINGLE: PushupCount = PushupCount::ONE;

pub struct Ledger<C = SystemClock> {
    clock: C,
    store: CounterStore,
    autosave: bool,
    standings: Option<Standings>,
}

impl Ledger<SystemClock> {
    /// Ledger backed by the configured save file and calendar.
    pub fn from_config(config: &GolConfig) -> Result<Self, InvalidWeekday> {
        let clock = SystemClock::from_config(config)?;
        Ok(Self::new(CounterStore::new(config.save_file()), clock).with_autosave(config.autosave()))
    }
}

impl<C: ClockOracle> Ledger<C> {
    #[must_use]
    pub fn new(store: CounterStore, clock: C) -> Self {
        Self {
            clock,
            store,
            autosave: true,
            standings: None,
        }
    }

    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    #[must_use]
    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.standings.is_some()
    }

    #[must_use]
    pub fn standings(&self) -> Option<&Standings> {
        self.standings.as_ref()
    }

    fn configured(&self) -> Result<&Standings, LedgerError> {
        self.standings.as_ref().ok_or(LedgerError::NotConfigured)
    }

    fn configured_mut(&mut self) -> Result<&mut Standings, LedgerError> {
        self.standings.as_mut().ok_or(LedgerError::NotConfigured)
    }

    fn autosave(&self) -> Result<(), LedgerError> {
        if self.autosave {
            self.save()?;
        }
        Ok(())
    }

    /// Resets everything to two fresh participants and persists immediately.
    pub fn configure(
        &mut self,
        name_a: &str,
        id_a: &str,
        name_b: &str,
        id_b: &str,
    ) -> Result<(), LedgerError> {
        let first = participant_id(id_a)?;
        let second = participant_id(id_b)?;
        let standings =
            Standings::new(Participant::new(first, name_a), Participant::new(second, name_b))?;

        self.store.save(&standings)?;
        tracing::info!(
            first = %standings.first().id(),
            second = %standings.second().id(),
            "Counter configured"
        );
        self.standings = Some(standings);
        Ok(())
    }

    pub fn opposite(&self, id: &str) -> Result<ParticipantId, LedgerError> {
        Ok(self.configured()?.opposite(id)?.clone())
    }

    pub fn participant(&self, id: &str) -> Result<&Participant, LedgerError> {
        Ok(self.configured()?.participant(id)?)
    }

    pub fn normals(&self, id: &str) -> Result<u32, LedgerError> {
        Ok(self.configured()?.normals_owed(id)?)
    }

    pub fn punishments(&self, id: &str) -> Result<u32, LedgerError> {
        Ok(self.participant(id)?.punishments())
    }

    /// Central dispatch for reported push-ups.
    ///
    /// - Self-report (`requester == target`): on a special day the requester
    ///   owes 1, otherwise the other participant owes 1.
    /// - Peer report: the requester owes 2 on a special day, 1 otherwise.
    pub fn add_pushups(&mut self, requester: &str, target: &str) -> Result<(), LedgerError> {
        let special = self.clock.is_special_day();
        apply_pushups(self.configured_mut()?, special, requester, target)?;
        self.autosave()
    }

    /// Voice message from `sender`: costs the opposite participant a peer
    /// report, but only on special days and only if `sender` has the weekend
    /// flag. Returns whether anything was applied.
    ///
    /// On an ordinary day the sender is not even looked up.
    pub fn process_audio(&mut self, sender: &str) -> Result<bool, LedgerError> {
        let special = self.clock.is_special_day();
        let standings = self.configured_mut()?;
        if !special {
            tracing::debug!(participant = %sender, "Audio ignored on an ordinary day");
            return Ok(false);
        }
        if !standings.participant(sender)?.weekend_flag() {
            tracing::debug!(participant = %sender, "Audio ignored, no weekend flag");
            return Ok(false);
        }

        let requester = standings.opposite(sender)?.clone();
        apply_pushups(standings, special, requester.as_str(), sender)?;
        self.autosave()?;
        Ok(true)
    }

    /// An error by `sender` counts as two peer reports against them.
    pub fn process_error(&mut self, sender: &str) -> Result<(), LedgerError> {
        let special = self.clock.is_special_day();
        let standings = self.configured_mut()?;
        let target = standings.opposite(sender)?.clone();
        for _ in 0..2 {
            apply_pushups(standings, special, sender, target.as_str())?;
        }
        self.autosave()
    }

    pub fn add_normals(&mut self, id: &str, count: i64) -> Result<(), LedgerError> {
        let count = PushupCount::from_signed(count)?;
        net_normals(self.configured_mut()?, id, count)?;
        tracing::info!(participant = %id, units = count.get(), "Normal push-ups added");
        self.autosave()
    }

    pub fn add_punishments(&mut self, id: &str, count: i64) -> Result<(), LedgerError> {
        let count = PushupCount::from_signed(count)?;
        self.configured_mut()?.add_punishments(id, count)?;
        tracing::info!(participant = %id, units = count.get(), "Punishment push-ups added");
        self.autosave()
    }

    /// Marks `count` blocks as done, paying punishments before normal debt.
    pub fn complete_pushups(&mut self, id: &str, count: i64) -> Result<Completion, LedgerError> {
        let count = PushupCount::from_signed(count)?;
        let done = self.configured_mut()?.complete_pushups(id, count)?;
        tracing::info!(
            participant = %id,
            units = count.get(),
            punishments = done.punishments,
            normals = done.normals,
            "Push-ups completed"
        );
        self.autosave()?;
        Ok(done)
    }

    pub fn set_weekend_flag(&mut self, id: &str, flag: bool) -> Result<(), LedgerError> {
        self.configured_mut()?.set_weekend_flag(id, flag)?;
        tracing::info!(participant = %id, flag, "Weekend flag changed");
        self.autosave()
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), LedgerError> {
        self.configured_mut()?.rename(id, name)?;
        self.autosave()
    }

    pub fn push_up_table(&self) -> Result<String, LedgerError> {
        Ok(render_table(self.configured()?))
    }

    /// One sentence per participant, in table order.
    pub fn summary(&self) -> Result<String, LedgerError> {
        Ok(self.configured()?.to_string())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        self.store.save(self.configured()?)?;
        Ok(())
    }

    /// Replaces the in-memory state with the saved record.
    ///
    /// All or nothing: on any error the ledger keeps whatever state it had,
    /// configured or not.
    pub fn load(&mut self) -> Result<(), LedgerError> {
        let standings = self.store.load()?;
        tracing::info!(
            first = %standings.first().id(),
            second = %standings.second().id(),
            normals = standings.debt_queue().len(),
            "Counter loaded"
        );
        self.standings = Some(standings);
        Ok(())
    }
}

fn participant_id(raw: &str) -> Result<ParticipantId, InvalidArgument> {
    let id = ParticipantId::new(raw)?;
    if id.as_str() == NORMALS_KEY {
        return Err(InvalidArgument::ReservedId(id));
    }
    Ok(id)
}

/// Both ids are checked before anything changes.
fn apply_pushups(
    standings: &mut Standings,
    special: bool,
    requester: &str,
    target: &str,
) -> Result<(), LedgerError> {
    standings.participant(target)?;
    let requester_id = standings.participant(requester)?.id().clone();

    let (debtor, units) = if requester == target {
        if special {
            (requester_id, SINGLE)
        } else {
            (standings.opposite(requester)?.clone(), SINGLE)
        }
    } else if special {
        (requester_id, PushupCount::new(2)?)
    } else {
        (requester_id, SINGLE)
    };

    net_normals(standings, debtor.as_str(), units)?;
    tracing::info!(
        requester = %requester,
        target = %target,
        debtor = %debtor,
        units = units.get(),
        special,
        "Push-ups added"
    );
    Ok(())
}

/// Credits normals to `id` and traces how the shared queue moved.
fn net_normals(
    standings: &mut Standings,
    id: &str,
    units: PushupCount,
) -> Result<(), LedgerError> {
    let before = standings.debt_queue().clone();
    standings.add_normals(id, units)?;
    let after = standings.debt_queue();
    tracing::debug!(
        participant = %id,
        units = units.get(),
        carrier_before = ?before.carrier(),
        owed_before = before.len(),
        carrier_after = ?after.carrier(),
        owed_after = after.len(),
        "Normal debt netted"
    );
    Ok(())
}
