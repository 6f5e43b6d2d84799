//! # stay-engine
//!
//! Date-range availability and booking-conflict detection for vacation-rental
//! venues backed by the Holidaze API.
//!
//! Bookings are half-open `[check-in, check-out)` windows over calendar dates,
//! so a guest may check in on the day the previous guest checks out. Every date
//! from the API is normalised to a [`CalendarDate`] once, at ingestion, and the
//! interval logic never sees a timestamp.
//!
//! ## Modules
//!
//! - [`date`] — `CalendarDate` and ingestion-time date normalisation
//! - [`window`] — validated `BookingWindow`s
//! - [`overlap`] — overlap test, availability verdicts, conflict listing
//! - [`blocked`] — blocked ranges and dates for calendar widgets
//! - [`vacancy`] — open stretches between bookings
//! - [`status`] — booking display status
//! - [`envelope`] — API payload decoding
//! - [`store`] — per-user key-value storage and favourites
//! - [`suggest`] — typeahead ranking and rate limiting
//! - [`error`] — Error types

pub mod blocked;
pub mod date;
pub mod envelope;
pub mod error;
pub mod overlap;
pub mod status;
pub mod store;
pub mod suggest;
pub mod vacancy;
pub mod window;

pub use blocked::{blocked_dates, derive_blocked_ranges, is_check_in_allowed, BlockedRange};
pub use date::{parse_calendar_date, CalendarDate};
pub use envelope::{decode_bookings, decode_venues, BookingRecord, VenueSummary};
pub use error::StayError;
pub use overlap::{check_availability, find_conflicts, is_available, overlaps, AvailabilityVerdict};
pub use status::{infer_status, BookingStatus};
pub use vacancy::{find_first_open_window, find_open_windows, OpenWindow};
pub use window::{BookingWindow, CandidateRange};
