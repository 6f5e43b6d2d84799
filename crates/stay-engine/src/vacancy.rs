//! Compute open stretches between bookings.
//!
//! Sorts bookings by check-in, merges overlapping or back-to-back stays, then
//! returns the gaps between merged stays within a search window.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::window::BookingWindow;

/// A free stretch of nights, half-open like [`BookingWindow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenWindow {
    pub date_from: CalendarDate,
    pub date_to: CalendarDate,
    pub nights: i64,
}

impl OpenWindow {
    fn between(date_from: CalendarDate, date_to: CalendarDate) -> Self {
        Self {
            date_from,
            date_to,
            nights: date_from.days_until(date_to),
        }
    }
}

/// Merge overlapping or touching bookings, clipped to the search window.
///
/// Returns a sorted, non-overlapping list of `(from, to)` spans.
fn merge_occupied(
    existing: &[BookingWindow],
    window_from: CalendarDate,
    window_to: CalendarDate,
) -> Vec<(CalendarDate, CalendarDate)> {
    let mut spans: Vec<(CalendarDate, CalendarDate)> = existing
        .iter()
        .filter(|b| b.date_from() < window_to && b.date_to() > window_from)
        .map(|b| (b.date_from().max(window_from), b.date_to().min(window_to)))
        .collect();

    spans.sort_unstable();

    let mut merged: Vec<(CalendarDate, CalendarDate)> = Vec::with_capacity(spans.len());
    for (from, to) in spans {
        if let Some(last) = merged.last_mut() {
            // Back-to-back stays leave no night free between them.
            if from <= last.1 {
                last.1 = last.1.max(to);
                continue;
            }
        }
        merged.push((from, to));
    }

    merged
}

/// Open stretches inside `[window_from, window_to)`, sorted by check-in.
///
/// Bookings may overlap each other; they are merged first. An empty or
/// inverted search window has no open stretches.
pub fn find_open_windows(
    existing: &[BookingWindow],
    window_from: CalendarDate,
    window_to: CalendarDate,
) -> Vec<OpenWindow> {
    if window_from >= window_to {
        return Vec::new();
    }

    let mut open = Vec::new();
    let mut cursor = window_from;

    for (busy_from, busy_to) in merge_occupied(existing, window_from, window_to) {
        if cursor < busy_from {
            open.push(OpenWindow::between(cursor, busy_from));
        }
        cursor = cursor.max(busy_to);
    }

    if cursor < window_to {
        open.push(OpenWindow::between(cursor, window_to));
    }

    open
}

/// The earliest open stretch of at least `min_nights` nights.
pub fn find_first_open_window(
    existing: &[BookingWindow],
    window_from: CalendarDate,
    window_to: CalendarDate,
    min_nights: i64,
) -> Option<OpenWindow> {
    find_open_windows(existing, window_from, window_to)
        .into_iter()
        .find(|w| w.nights >= min_nights)
}
