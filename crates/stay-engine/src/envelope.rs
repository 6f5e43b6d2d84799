//! Decode Holidaze API payloads into one canonical shape.
//!
//! The API sometimes wraps results in `{ "data": ..., "meta": ... }` and
//! sometimes returns them bare; bookings may also arrive nested inside a venue
//! object (`?_bookings=true`). All of that is resolved here so nothing
//! downstream branches on response shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::window::BookingWindow;

/// A response body, with or without the `data` wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Wrapped {
        data: T,
        #[serde(default)]
        meta: Option<Value>,
    },
    Bare(T),
}

impl<T> ApiEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            ApiEnvelope::Wrapped { data, .. } => data,
            ApiEnvelope::Bare(inner) => inner,
        }
    }
}

/// A booking as the API reports it. Dates are kept as strings until
/// [`BookingRecord::window`] normalises them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub date_from: String,
    pub date_to: String,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl BookingRecord {
    /// Parse and validate the record's dates.
    pub fn window(&self) -> Result<BookingWindow> {
        BookingWindow::parse(&self.date_from, &self.date_to)
    }
}

/// Location fields used for typeahead matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<VenueLocation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BookingsPayload {
    List(Vec<BookingRecord>),
    Venue { bookings: Vec<BookingRecord> },
}

/// Decode bookings from any of the shapes the API produces.
///
/// # Errors
/// Returns [`StayError::Payload`](crate::StayError::Payload) if the JSON is
/// malformed or matches none of the known shapes.
pub fn decode_bookings(json: &str) -> Result<Vec<BookingRecord>> {
    let payload: ApiEnvelope<BookingsPayload> = serde_json::from_str(json)?;
    Ok(match payload.into_inner() {
        BookingsPayload::List(records) => records,
        BookingsPayload::Venue { bookings } => bookings,
    })
}

/// Decode a venue list, wrapped or bare.
pub fn decode_venues(json: &str) -> Result<Vec<VenueSummary>> {
    let payload: ApiEnvelope<Vec<VenueSummary>> = serde_json::from_str(json)?;
    Ok(payload.into_inner())
}

/// Normalise every record into a [`BookingWindow`], stopping at the first
/// malformed one.
pub fn windows_from_records(records: &[BookingRecord]) -> Result<Vec<BookingWindow>> {
    records.iter().map(BookingRecord::window).collect()
}
