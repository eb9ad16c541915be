//! Clock oracle: "is today a special day?"
//!
//! The ledger never reads the calendar itself. It asks a [`ClockOracle`], so
//! rules can be evaluated against a fixed answer in tests.
//!
//! Convention: days are chrono [`Weekday`]s. The default special days are
//! Friday, Saturday and Sunday. That is the historical cutoff of the counter
//! (everything after Thursday); three days rather than the usual two, kept
//! as is until someone confirms otherwise.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate, Weekday};
use gol_config::GolConfig;
use thiserror::Error;

pub trait ClockOracle {
    fn is_special_day(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday '{0}'; expected a name such as \"fri\" or \"Saturday\"")]
pub struct InvalidWeekday(pub String);

/// A set of weekdays, stored as a bitmask indexed from Monday.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SpecialDays(u8);

impl SpecialDays {
    pub const NONE: Self = Self(0);

    #[must_use]
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter()
            .fold(Self::NONE, |set, day| Self(set.0 | bit(day)))
    }

    /// Parses weekday names case-insensitively (`"fri"`, `"Friday"`).
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, InvalidWeekday> {
        let days = names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                name.parse::<Weekday>()
                    .map_err(|_| InvalidWeekday(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(days))
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    #[must_use]
    pub fn is_special(self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }
}

impl Default for SpecialDays {
    fn default() -> Self {
        Self::new([Weekday::Fri, Weekday::Sat, Weekday::Sun])
    }
}

impl fmt::Debug for SpecialDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<Weekday> = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| self.contains(*day))
        .collect();
        f.debug_tuple("SpecialDays").field(&days).finish()
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

/// Answers from the local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    special_days: SpecialDays,
}

impl SystemClock {
    #[must_use]
    pub fn new(special_days: SpecialDays) -> Self {
        Self { special_days }
    }

    pub fn from_config(config: &GolConfig) -> Result<Self, InvalidWeekday> {
        SpecialDays::parse(&config.special_days()).map(Self::new)
    }
}

impl ClockOracle for SystemClock {
    fn is_special_day(&self) -> bool {
        self.special_days.is_special(Local::now().date_naive())
    }
}

/// Always gives the same answer. Used by tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    special: bool,
}

impl FixedClock {
    #[must_use]
    pub const fn special() -> Self {
        Self { special: true }
    }

    #[must_use]
    pub const fn ordinary() -> Self {
        Self { special: false }
    }
}

impl ClockOracle for FixedClock {
    fn is_special_day(&self) -> bool {
        self.special
    }
}
