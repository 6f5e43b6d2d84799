//! Display status of a booking.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::window::BookingWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BookingStatus {
    /// Check-in is still in the future.
    Upcoming,
    /// The guest is staying at the venue today.
    InProgress,
    /// Check-out has passed.
    Completed,
    Canceled,
    /// Awaiting confirmation. Only ever reported by the API, never inferred.
    Pending,
}

impl BookingStatus {
    /// Map an explicit API status string, if it is one we recognise.
    pub fn from_api(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "canceled" | "cancelled" => Some(Self::Canceled),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "upcoming" | "confirmed" => Some(Self::Upcoming),
            "in_progress" | "in-progress" | "inprogress" => Some(Self::InProgress),
            _ => None,
        }
    }
}

/// Decide how a booking should be labelled on `today`.
///
/// A recognised explicit status wins. Otherwise the label follows the dates:
/// before check-in is `Upcoming`, `[from, to)` is `InProgress`, and from the
/// check-out day on it is `Completed`. A "confirmed" status on a stay that has
/// already started still follows the dates.
pub fn infer_status(
    window: &BookingWindow,
    explicit: Option<&str>,
    today: CalendarDate,
) -> BookingStatus {
    let by_date = if today < window.date_from() {
        BookingStatus::Upcoming
    } else if window.contains(today) {
        BookingStatus::InProgress
    } else {
        BookingStatus::Completed
    };

    match explicit.and_then(BookingStatus::from_api) {
        Some(BookingStatus::Upcoming) | None => by_date,
        Some(status) => status,
    }
}
