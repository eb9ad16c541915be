//! The shared "normal" debt queue.
//!
//! Both participants of one ledger share a single queue. Conceptually it is a
//! list of participant-id tokens where every token is the same id: whoever
//! appears in it owes one normal block per token. We store that as the owner
//! plus a unit count, so a queue holding two different owners cannot exist.

use thiserror::Error;

use crate::{InvalidArgument, MAX_BLOCKS, ParticipantId, PushupCount};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Debt {
    owner: ParticipantId,
    /// Invariant: always > 0. An empty queue is `carrier: None`.
    units: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("normal debt mixes two carriers ('{first}' and '{second}')")]
pub struct MixedCarrierError {
    pub first: ParticipantId,
    pub second: ParticipantId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtQueue {
    carrier: Option<Debt>,
}

impl DebtQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a queue from its token form. All tokens must be the same id.
    pub fn from_tokens(
        tokens: impl IntoIterator<Item = ParticipantId>,
    ) -> Result<Self, MixedCarrierError> {
        let mut carrier: Option<Debt> = None;
        for token in tokens {
            match carrier.as_mut() {
                None => {
                    carrier = Some(Debt {
                        owner: token,
                        units: 1,
                    });
                }
                Some(debt) if debt.owner == token => {
                    debt.units = debt.units.saturating_add(1);
                }
                Some(debt) => {
                    return Err(MixedCarrierError {
                        first: debt.owner.clone(),
                        second: token,
                    });
                }
            }
        }
        Ok(Self { carrier })
    }

    /// Token form used by the persisted record: the carrier id repeated once per unit.
    pub fn tokens(&self) -> impl Iterator<Item = &ParticipantId> {
        self.carrier
            .iter()
            .flat_map(|debt| std::iter::repeat_n(&debt.owner, debt.units as usize))
    }

    /// The participant currently carrying normal debt, if any.
    #[must_use]
    pub fn carrier(&self) -> Option<&ParticipantId> {
        self.carrier.as_ref().map(|debt| &debt.owner)
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.carrier.as_ref().map_or(0, |debt| debt.units)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carrier.is_none()
    }

    #[must_use]
    pub fn owed_by(&self, id: &ParticipantId) -> u32 {
        match &self.carrier {
            Some(debt) if debt.owner == *id => debt.units,
            _ => 0,
        }
    }

    /// Credits `count` normal blocks to `id`.
    ///
    /// The opposite side's outstanding debt is cancelled first; only the
    /// surplus accrues to `id`. A balance above [`MAX_BLOCKS`] is refused and
    /// leaves the queue untouched.
    pub fn add_normals(
        &mut self,
        id: &ParticipantId,
        count: PushupCount,
    ) -> Result<(), InvalidArgument> {
        let count = count.get();
        self.carrier = match self.carrier.take() {
            Some(debt) if debt.owner == *id => {
                let total = u64::from(debt.units) + u64::from(count);
                if total > u64::from(MAX_BLOCKS) {
                    self.carrier = Some(debt);
                    return Err(InvalidArgument::CountTooLarge(total as i64));
                }
                Some(Debt {
                    owner: debt.owner,
                    units: total as u32,
                })
            }
            Some(debt) if debt.units > count => Some(Debt {
                owner: debt.owner,
                units: debt.units - count,
            }),
            // Opposite fully paid off; whatever is left carries on.
            Some(debt) => (count > debt.units).then(|| Debt {
                owner: id.clone(),
                units: count - debt.units,
            }),
            None => Some(Debt {
                owner: id.clone(),
                units: count,
            }),
        };
        Ok(())
    }

    /// Removes up to `units` blocks from `id`'s debt and returns how many went.
    ///
    /// Never touches the balance when someone else carries it.
    pub fn retire(&mut self, id: &ParticipantId, units: u32) -> u32 {
        if units == 0 {
            return 0;
        }
        match self.carrier.take() {
            Some(mut debt) if debt.owner == *id => {
                if debt.units > units {
                    debt.units -= units;
                    self.carrier = Some(debt);
                    units
                } else {
                    debt.units
                }
            }
            other => {
                self.carrier = other;
                0
            }
        }
    }
}
