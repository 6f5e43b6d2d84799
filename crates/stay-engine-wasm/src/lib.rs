//! WASM bindings for stay-engine.
//!
//! Exposes availability checks, blocked-date derivation, open-window search and
//! typeahead ranking to the booking UI via `wasm-bindgen`. All complex types are
//! passed as JSON strings. Booking payloads may be in any shape the Holidaze
//! API returns (bare array, `{data: [...]}`, or a venue with `bookings`).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/stay-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use serde::Serialize;
use stay_engine::{BookingWindow, CalendarDate, StayError};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_js(e: StayError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_date(s: &str) -> Result<CalendarDate, JsValue> {
    stay_engine::parse_calendar_date(s).map_err(to_js)
}

/// Decode a bookings payload and normalise every record into a window.
fn parse_bookings_json(json: &str) -> Result<Vec<BookingWindow>, JsValue> {
    let records = stay_engine::decode_bookings(json).map_err(to_js)?;
    stay_engine::envelope::windows_from_records(&records).map_err(to_js)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether the stay `[date_from, date_to)` is free given the venue's bookings.
///
/// Throws on malformed dates or an empty/inverted candidate, so the UI can tell
/// "invalid input" apart from "unavailable" (`false`).
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(date_from: &str, date_to: &str, bookings_json: &str) -> Result<bool, JsValue> {
    let candidate = BookingWindow::parse(date_from, date_to).map_err(to_js)?;
    let existing = parse_bookings_json(bookings_json)?;
    Ok(stay_engine::is_available(&candidate, &existing))
}

/// Full availability verdict: `{available, conflicts: [...]}` as JSON.
#[wasm_bindgen(js_name = "checkAvailability")]
pub fn check_availability(
    date_from: &str,
    date_to: &str,
    bookings_json: &str,
) -> Result<String, JsValue> {
    let records = stay_engine::decode_bookings(bookings_json).map_err(to_js)?;
    let verdict = stay_engine::check_availability(date_from, date_to, &records).map_err(to_js)?;
    to_json(&verdict)
}

/// Inclusive `{from, to}` ranges for the date picker, one per booking.
#[wasm_bindgen(js_name = "deriveBlockedRanges")]
pub fn derive_blocked_ranges(bookings_json: &str) -> Result<String, JsValue> {
    let existing = parse_bookings_json(bookings_json)?;
    let ranges: Vec<_> = stay_engine::derive_blocked_ranges(&existing).collect();
    to_json(&ranges)
}

/// Every blocked date as a sorted JSON array of `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "blockedDates")]
pub fn blocked_dates(bookings_json: &str) -> Result<String, JsValue> {
    let existing = parse_bookings_json(bookings_json)?;
    to_json(&stay_engine::blocked_dates(&existing))
}

/// Open stretches between bookings within `[window_from, window_to)`.
///
/// Returns a JSON array of `{dateFrom, dateTo, nights}`.
#[wasm_bindgen(js_name = "findOpenWindows")]
pub fn find_open_windows(
    bookings_json: &str,
    window_from: &str,
    window_to: &str,
) -> Result<String, JsValue> {
    let existing = parse_bookings_json(bookings_json)?;
    let open = stay_engine::find_open_windows(
        &existing,
        parse_date(window_from)?,
        parse_date(window_to)?,
    );
    to_json(&open)
}

/// Rank venues for a typeahead query. `venues_json` is a venue list, bare or
/// wrapped in `data`.
#[wasm_bindgen(js_name = "rankSuggestions")]
pub fn rank_suggestions(query: &str, venues_json: &str, limit: u32) -> Result<String, JsValue> {
    let venues = stay_engine::decode_venues(venues_json).map_err(to_js)?;
    let ranked = stay_engine::suggest::rank_suggestions(query, &venues, limit as usize);
    to_json(&ranked)
}
