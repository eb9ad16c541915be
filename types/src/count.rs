//! Validated push-up counts.
//!
//! Every mutator on the ledger takes a [`PushupCount`], so a zero, negative or
//! oversized amount is rejected before any counter or queue is touched.

use std::num::NonZeroU32;

use crate::InvalidArgument;

/// Upper bound for a single amount and for any stored balance.
///
/// The save file spells normal debt out one token per block, so this also
/// bounds its size.
pub const MAX_BLOCKS: u32 = 10_000;

/// A strictly positive number of push-up blocks, at most [`MAX_BLOCKS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PushupCount(NonZeroU32);

impl PushupCount {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    pub fn new(value: u32) -> Result<Self, InvalidArgument> {
        if value > MAX_BLOCKS {
            return Err(InvalidArgument::CountTooLarge(i64::from(value)));
        }
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(InvalidArgument::NonPositiveCount(i64::from(value)))
    }

    /// Accepts the signed amounts that arrive from user input.
    pub fn from_signed(value: i64) -> Result<Self, InvalidArgument> {
        let unsigned = u32::try_from(value).map_err(|_| {
            if value <= 0 {
                InvalidArgument::NonPositiveCount(value)
            } else {
                InvalidArgument::CountTooLarge(value)
            }
        })?;
        Self::new(unsigned)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for PushupCount {
    type Error = InvalidArgument;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
