//! Core domain types for the push-up ledger.
//!
//! This crate contains pure domain types with no IO and no clock access:
//! participants, the shared normal-debt queue, and validated counts.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod count;
mod debt;
mod ids;
mod participant;
mod standings;
pub mod text;

pub use count::{MAX_BLOCKS, PushupCount};
pub use debt::{DebtQueue, MixedCarrierError};
pub use ids::ParticipantId;
pub use participant::Participant;
pub use standings::{Completion, RestoreError, Standings, UnknownParticipant, UpdateError};

use thiserror::Error;

/// Arguments rejected before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("push-up count must be positive (got {0})")]
    NonPositiveCount(i64),
    #[error("push-up count {0} is above the limit of {max}", max = MAX_BLOCKS)]
    CountTooLarge(i64),
    #[error("participant id must not be empty")]
    EmptyId,
    #[error("both participants share the id '{0}'")]
    DuplicateId(ParticipantId),
    #[error("'{0}' is reserved and cannot be a participant id")]
    ReservedId(ParticipantId),
}
