//! Tests for overlap detection and availability verdicts.

use stay_engine::envelope::BookingRecord;
use stay_engine::{check_availability, find_conflicts, is_available, overlaps, BookingWindow, StayError};

/// Helper to build a window from two `YYYY-MM-DD` strings.
fn w(from: &str, to: &str) -> BookingWindow {
    BookingWindow::parse(from, to).unwrap()
}

fn record(from: &str, to: &str) -> BookingRecord {
    BookingRecord {
        id: None,
        date_from: from.to_string(),
        date_to: to.to_string(),
        guests: None,
        status: None,
    }
}

// ── overlaps ────────────────────────────────────────────────────────────────

#[test]
fn adjacent_windows_do_not_overlap() {
    let a = w("2024-01-01", "2024-01-05");
    let b = w("2024-01-05", "2024-01-10");
    assert!(!overlaps(&a, &b), "checkout day == check-in day is a turnover");
    assert!(!overlaps(&b, &a));
}

#[test]
fn strict_overlap_detected() {
    assert!(overlaps(
        &w("2024-01-01", "2024-01-05"),
        &w("2024-01-04", "2024-01-10")
    ));
}

#[test]
fn full_containment_overlaps_both_ways() {
    let outer = w("2024-01-01", "2024-01-10");
    let inner = w("2024-01-03", "2024-01-05");
    assert!(overlaps(&outer, &inner));
    assert!(overlaps(&inner, &outer));
}

#[test]
fn disjoint_with_gap_does_not_overlap() {
    assert!(!overlaps(
        &w("2024-01-01", "2024-01-05"),
        &w("2024-01-06", "2024-01-10")
    ));
}

#[test]
fn identical_windows_overlap() {
    let a = w("2024-03-01", "2024-03-02");
    assert!(overlaps(&a, &a));
}

// ── is_available ────────────────────────────────────────────────────────────

#[test]
fn empty_bookings_always_available() {
    assert!(is_available(&w("2024-01-01", "2024-01-05"), &[]));
}

#[test]
fn candidate_equal_to_existing_is_unavailable() {
    let existing = vec![w("2024-02-01", "2024-02-03"), w("2024-03-01", "2024-03-04")];
    assert!(!is_available(&existing[1], &existing));
}

#[test]
fn turnover_on_both_ends_is_available() {
    let existing = vec![w("2024-06-10", "2024-06-15"), w("2024-06-20", "2024-06-25")];
    assert!(is_available(&w("2024-06-15", "2024-06-20"), &existing));
}

#[test]
fn spanning_two_bookings_is_unavailable() {
    let existing = vec![w("2024-06-10", "2024-06-15"), w("2024-06-20", "2024-06-25")];
    assert!(!is_available(&w("2024-06-12", "2024-06-22"), &existing));
}

// ── find_conflicts ──────────────────────────────────────────────────────────

#[test]
fn conflicts_report_shared_span_in_input_order() {
    let existing = vec![w("2024-06-10", "2024-06-15"), w("2024-06-20", "2024-06-25")];
    let conflicts = find_conflicts(&w("2024-06-12", "2024-06-22"), &existing);

    assert_eq!(conflicts.len(), 2);

    assert_eq!(conflicts[0].index, 0);
    assert_eq!(conflicts[0].overlap_from.to_string(), "2024-06-12");
    assert_eq!(conflicts[0].overlap_to.to_string(), "2024-06-15");
    assert_eq!(conflicts[0].overlap_nights, 3);

    assert_eq!(conflicts[1].index, 1);
    assert_eq!(conflicts[1].overlap_from.to_string(), "2024-06-20");
    assert_eq!(conflicts[1].overlap_nights, 2);
}

#[test]
fn contained_candidate_overlap_is_candidate_length() {
    let conflicts = find_conflicts(
        &w("2024-01-03", "2024-01-05"),
        &[w("2024-01-01", "2024-01-10")],
    );
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_nights, 2);
}

// ── check_availability ──────────────────────────────────────────────────────

#[test]
fn check_availability_normalises_api_timestamps() {
    let records = vec![record("2024-06-10T00:00:00.000Z", "2024-06-15T00:00:00.000Z")];

    let verdict = check_availability("2024-06-15", "2024-06-18", &records).unwrap();
    assert!(verdict.available);
    assert!(verdict.conflicts.is_empty());

    let verdict = check_availability("2024-06-14", "2024-06-18", &records).unwrap();
    assert!(!verdict.available);
    assert_eq!(verdict.conflicts.len(), 1);
}

#[test]
fn check_availability_distinguishes_invalid_input_from_unavailable() {
    let records = vec![record("2024-06-10", "2024-06-15")];

    let err = check_availability("June 10th", "2024-06-18", &records).unwrap_err();
    assert!(matches!(err, StayError::InvalidDate { .. }));

    let err = check_availability("2024-06-18", "2024-06-18", &records).unwrap_err();
    assert!(matches!(err, StayError::InvalidWindow { .. }));
}

#[test]
fn check_availability_propagates_bad_existing_record() {
    let records = vec![record("2024-06-10", "garbage")];
    let err = check_availability("2024-07-01", "2024-07-03", &records).unwrap_err();
    assert!(matches!(err, StayError::InvalidDate { .. }));
}
