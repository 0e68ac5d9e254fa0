//! Dates and the walk-forward cursor over a panel

use std::vec::IntoIter;

use anyhow::Result;
use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use time::{format_description, Date, OffsetDateTime};

///[DateTime] is a wrapper around the epoch time as i64. Dates parsed from strings are pinned to
///09:00 UTC so that daily data loaded from different sources lines up on the same epoch.
//The internal representation with the time package should remain hidden from clients.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Hash,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Deref,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct DateTime(i64);

impl DateTime {
    pub fn from_date_string(val: &str, date_fmt: &str) -> Result<Self> {
        let format = format_description::parse(date_fmt)?;
        let parsed_date = Date::parse(val, &format)?;
        let parsed_time = parsed_date.with_time(time::macros::time!(09:00));
        Ok(Self::from(parsed_time.assume_utc().unix_timestamp()))
    }

    /// Accepts either an epoch integer or an ISO `YYYY-MM-DD` date.
    pub fn parse(val: &str) -> Result<Self> {
        let trimmed = val.trim();
        if let Ok(epoch) = trimmed.parse::<i64>() {
            return Ok(Self(epoch));
        }
        Self::from_date_string(trimmed, "[year]-[month]-[day]")
    }

    pub fn to_date_string(&self) -> Option<String> {
        let date = OffsetDateTime::from_unix_timestamp(self.0).ok()?;
        let format = format_description::parse("[year]-[month]-[day]").ok()?;
        date.format(&format).ok()
    }
}

/// Cursor over the ordered dates of a panel.
///
/// The runner owns the clock and ticks it once per evaluation step. `now` never runs ahead of
/// the last date handed to the strategy, which is what keeps the walk-forward free of lookahead.
#[derive(Clone, Debug)]
pub struct Clock {
    //We have a position and Vec because we should be able to return an iterator without changing
    //the state of the Clock
    pos: usize,
    dates: Vec<DateTime>,
}

impl Clock {
    pub fn new(dates: Vec<DateTime>) -> Self {
        Self { pos: 0, dates }
    }

    pub fn now(&self) -> Option<DateTime> {
        self.dates.get(self.pos).copied()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn has_next(&self) -> bool {
        self.pos + 1 < self.dates.len()
    }

    /// Moves to the next date, returns false and leaves the clock where it is if there is none.
    pub fn tick(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.pos += 1;
        true
    }

    // Doesn't change the iteration state, used for clients to setup data using clock
    pub fn peek(&self) -> IntoIter<DateTime> {
        self.dates.clone().into_iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
