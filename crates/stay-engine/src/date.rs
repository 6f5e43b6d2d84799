//! Calendar dates and the normalisation applied to every date at ingestion.
//!
//! A [`CalendarDate`] carries no time of day and no offset. The Holidaze API
//! sends a mix of bare dates (`2024-06-10`) and full timestamps
//! (`2024-06-10T22:00:00.000Z`); both are reduced to a calendar date here, once,
//! so interval arithmetic downstream never has to think about timezones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::error::{Result, StayError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ISO 8601 timestamps with an offset that RFC 3339 rejects: minute precision,
/// `+0200`, `+02`. `%#z` also accepts `Z`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Timestamps without an offset, read as UTC.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A day on the calendar, independent of any timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year, month and day. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The following day. Saturates at the end of chrono's supported range.
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// The preceding day. Saturates at the start of chrono's supported range.
    pub fn pred(&self) -> Self {
        Self(self.0.pred_opt().unwrap_or(self.0))
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self> {
        parse_calendar_date(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse an API date string into a [`CalendarDate`].
///
/// Accepted forms, tried in order:
///
/// 1. `YYYY-MM-DD` -- taken literally, never shifted by a timezone.
/// 2. ISO 8601 timestamp with an offset (`2024-06-10T23:30:00+02:00`, `...Z`,
///    `2024-06-10T14:00Z`, `2024-06-10T14:00:00+0200`) -- converted to UTC,
///    then the UTC calendar date is kept.
/// 3. Naive timestamp (`2024-06-10T14:00:00`, `2024-06-10T14:00`, optional
///    fractional seconds) -- interpreted as UTC; the date part is kept.
///
/// # Errors
/// Returns [`StayError::InvalidDate`] for anything else, including impossible
/// dates such as `2024-02-30`.
pub fn parse_calendar_date(input: &str) -> Result<CalendarDate> {
    let s = input.trim();
    if s.is_empty() {
        return Err(invalid(input, "empty date string"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        trace!(input, "parsed as calendar date");
        return Ok(CalendarDate(date));
    }

    let with_offset = DateTime::parse_from_rfc3339(s).or_else(|e| {
        OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
            .ok_or(e)
    });
    if let Ok(dt) = with_offset {
        trace!(input, "parsed as timestamp with offset, truncating to UTC date");
        return Ok(CalendarDate(dt.with_timezone(&Utc).date_naive()));
    }

    let mut last_err = None;
    for fmt in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(s, fmt) {
            Ok(ndt) => {
                trace!(input, "parsed as naive timestamp, treating as UTC");
                return Ok(CalendarDate(ndt.date()));
            }
            Err(e) => last_err = Some(e),
        }
    }

    let reason = last_err.map_or_else(|| "unrecognised format".to_string(), |e| e.to_string());
    Err(invalid(input, &reason))
}

fn invalid(input: &str, reason: &str) -> StayError {
    StayError::InvalidDate {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
