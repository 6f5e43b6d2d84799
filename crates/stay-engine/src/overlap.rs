//! Detect booking conflicts for a candidate stay.
//!
//! Windows are half-open `[date_from, date_to)`. A guest checking out on day X
//! does not block a new guest checking in on day X, so back-to-back stays are
//! never conflicts.

use serde::Serialize;
use tracing::debug;

use crate::date::CalendarDate;
use crate::envelope::{windows_from_records, BookingRecord};
use crate::error::Result;
use crate::window::BookingWindow;

/// An existing booking that overlaps a candidate stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    /// Position of the conflicting booking in the input list.
    pub index: usize,
    pub booking: BookingWindow,
    /// First shared night.
    pub overlap_from: CalendarDate,
    /// Exclusive end of the shared span.
    pub overlap_to: CalendarDate,
    pub overlap_nights: i64,
}

/// Outcome of an availability check. Being unavailable is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityVerdict {
    pub available: bool,
    pub conflicts: Vec<Conflict>,
}

/// Whether two windows share at least one occupied night.
///
/// Both windows must satisfy `date_from < date_to`; [`BookingWindow::new`]
/// enforces that.
pub fn overlaps(candidate: &BookingWindow, existing: &BookingWindow) -> bool {
    candidate.date_from() < existing.date_to() && candidate.date_to() > existing.date_from()
}

/// True iff `candidate` overlaps none of `existing`.
pub fn is_available(candidate: &BookingWindow, existing: &[BookingWindow]) -> bool {
    match existing.iter().position(|b| overlaps(candidate, b)) {
        Some(index) => {
            debug!(
                from = %candidate.date_from(),
                to = %candidate.date_to(),
                index,
                "candidate rejected by existing booking"
            );
            false
        }
        None => true,
    }
}

/// Every existing booking that overlaps `candidate`, in input order.
///
/// The shared span is `[max(from), min(to))`.
pub fn find_conflicts(candidate: &BookingWindow, existing: &[BookingWindow]) -> Vec<Conflict> {
    existing
        .iter()
        .enumerate()
        .filter(|(_, b)| overlaps(candidate, b))
        .map(|(index, b)| {
            let overlap_from = candidate.date_from().max(b.date_from());
            let overlap_to = candidate.date_to().min(b.date_to());
            Conflict {
                index,
                booking: *b,
                overlap_from,
                overlap_to,
                overlap_nights: overlap_from.days_until(overlap_to),
            }
        })
        .collect()
}

/// Check a candidate given as raw date strings against API booking records.
///
/// # Errors
/// Returns [`StayError::InvalidDate`](crate::StayError::InvalidDate) if any
/// date fails to parse, and
/// [`StayError::InvalidWindow`](crate::StayError::InvalidWindow) if the
/// candidate or a record has check-out on or before check-in.
pub fn check_availability(
    date_from: &str,
    date_to: &str,
    records: &[BookingRecord],
) -> Result<AvailabilityVerdict> {
    let candidate = BookingWindow::parse(date_from, date_to)?;
    let existing = windows_from_records(records)?;
    let conflicts = find_conflicts(&candidate, &existing);

    if !conflicts.is_empty() {
        debug!(
            from = %candidate.date_from(),
            to = %candidate.date_to(),
            conflicts = conflicts.len(),
            "candidate unavailable"
        );
    }

    Ok(AvailabilityVerdict {
        available: conflicts.is_empty(),
        conflicts,
    })
}
