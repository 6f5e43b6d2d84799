//! Derive the dates a calendar widget should disable.
//!
//! Each booking `[from, to)` becomes an inclusive [`BlockedRange`]
//! `[from, to - 1]`: the check-out day stays selectable as somebody else's
//! check-in. This is a presentation aid only; the booking service re-checks
//! availability when the reservation is submitted.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::date::CalendarDate;
use crate::window::BookingWindow;

/// An inclusive run of dates that cannot be chosen as check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BlockedRange {
    #[serde(rename = "from")]
    pub first: CalendarDate,
    #[serde(rename = "to")]
    pub last: CalendarDate,
}

impl BlockedRange {
    /// Iterate over every date in the range, `first` through `last`.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> {
        let last = self.last;
        std::iter::successors(Some(self.first), move |d| {
            let next = d.succ();
            (next <= last && next != *d).then_some(next)
        })
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.first <= date && date <= self.last
    }
}

impl From<&BookingWindow> for BlockedRange {
    fn from(w: &BookingWindow) -> Self {
        Self {
            first: w.date_from(),
            last: w.date_to().pred(),
        }
    }
}

/// One blocked range per booking, in input order.
///
/// The iterator borrows `existing` and holds no other state; calling this
/// again on the same slice yields the same sequence.
pub fn derive_blocked_ranges(
    existing: &[BookingWindow],
) -> impl Iterator<Item = BlockedRange> + Clone + '_ {
    existing.iter().map(BlockedRange::from)
}

/// Every blocked date across all bookings, deduplicated and sorted.
pub fn blocked_dates(existing: &[BookingWindow]) -> BTreeSet<CalendarDate> {
    derive_blocked_ranges(existing)
        .flat_map(|r| r.dates())
        .collect()
}

/// Whether `date` may be picked as a check-in day.
pub fn is_check_in_allowed(date: CalendarDate, existing: &[BookingWindow]) -> bool {
    !derive_blocked_ranges(existing).any(|r| r.contains(date))
}
