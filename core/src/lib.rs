//! Push-up ledger rules engine.
//!
//! Two participants share one normal-debt queue; each also carries an
//! independent punishment counter. The [`Ledger`] turns events (self reports,
//! peer reports, voice messages, errors) into debt, consulting a
//! [`ClockOracle`] for special days, and persists through a [`CounterStore`].

pub mod clock;
pub mod errors;
mod ledger;
pub mod persistence;
mod table;

pub use clock::{ClockOracle, FixedClock, InvalidWeekday, SpecialDays, SystemClock};
pub use errors::LedgerError;
pub use ledger::Ledger;
pub use persistence::CounterStore;
pub use table::render_table;
