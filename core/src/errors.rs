//! Error taxonomy of the rules engine.
//!
//! The engine never swallows these. Adapters decide what the user sees; the
//! CLI, for instance, turns [`LedgerError::NotConfigured`] into a hint.

use gol_types::{InvalidArgument, UnknownParticipant, UpdateError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The persisted record is malformed or structurally invalid.
    #[error("wrong counter file format: {0}")]
    WrongCounterFileFormat(String),
    #[error("could not find participant '{0}'")]
    ParticipantNotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    /// A rule ran before `configure` or a successful `load`.
    #[error("the counter is not configured yet")]
    NotConfigured,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::WrongCounterFileFormat(reason.into())
    }

    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}

impl From<UnknownParticipant> for LedgerError {
    fn from(err: UnknownParticipant) -> Self {
        Self::ParticipantNotFound(err.0)
    }
}

impl From<UpdateError> for LedgerError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::UnknownParticipant(err) => err.into(),
            UpdateError::InvalidArgument(err) => err.into(),
        }
    }
}
