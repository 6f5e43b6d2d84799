//! Booking windows: validated half-open `[check-in, check-out)` date spans.

use serde::Serialize;

use crate::date::{parse_calendar_date, CalendarDate};
use crate::error::{Result, StayError};

/// A reserved (or proposed) stay at a venue.
///
/// `date_from` is the check-in day and is occupied. `date_to` is the check-out
/// day and is *not* occupied, so a new guest may arrive on it.
///
/// The only way to build one is through [`BookingWindow::new`] or
/// [`BookingWindow::parse`], so every value satisfies `date_from < date_to`:
///
/// ```compile_fail
/// use stay_engine::{BookingWindow, CalendarDate};
///
/// let day = CalendarDate::from_ymd(2024, 6, 10).unwrap();
/// let _ = BookingWindow { date_from: day, date_to: day };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWindow {
    date_from: CalendarDate,
    date_to: CalendarDate,
}

impl BookingWindow {
    /// Build a window, rejecting zero-length and inverted spans.
    ///
    /// # Errors
    /// Returns [`StayError::InvalidWindow`] unless `date_from < date_to`.
    pub fn new(date_from: CalendarDate, date_to: CalendarDate) -> Result<Self> {
        if date_from >= date_to {
            return Err(StayError::InvalidWindow {
                from: date_from.to_string(),
                to: date_to.to_string(),
            });
        }
        Ok(Self { date_from, date_to })
    }

    /// Parse both ends with [`parse_calendar_date`] and validate the span.
    pub fn parse(date_from: &str, date_to: &str) -> Result<Self> {
        let from = parse_calendar_date(date_from)?;
        let to = parse_calendar_date(date_to)?;
        Self::new(from, to)
    }

    /// Check-in day, the first occupied night.
    pub fn date_from(&self) -> CalendarDate {
        self.date_from
    }

    /// Check-out day, not occupied.
    pub fn date_to(&self) -> CalendarDate {
        self.date_to
    }

    /// Number of occupied nights.
    pub fn nights(&self) -> i64 {
        self.date_from.days_until(self.date_to)
    }

    /// Whether the venue is occupied on `date` by this window.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.date_from <= date && date < self.date_to
    }
}

/// A proposed stay that has not been persisted yet.
pub type CandidateRange = BookingWindow;
