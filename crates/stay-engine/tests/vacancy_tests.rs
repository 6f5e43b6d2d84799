//! Tests for open-window computation between bookings.

use stay_engine::vacancy::{find_first_open_window, find_open_windows};
use stay_engine::{BookingWindow, CalendarDate};

fn w(from: &str, to: &str) -> BookingWindow {
    BookingWindow::parse(from, to).unwrap()
}

fn d(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

#[test]
fn single_booking_produces_two_open_windows() {
    // Search: June 1-30, booked: June 10-15
    let open = find_open_windows(&[w("2024-06-10", "2024-06-15")], d("2024-06-01"), d("2024-06-30"));

    assert_eq!(open.len(), 2);
    assert_eq!(open[0].date_from, d("2024-06-01"));
    assert_eq!(open[0].date_to, d("2024-06-10"));
    assert_eq!(open[0].nights, 9);
    assert_eq!(open[1].date_from, d("2024-06-15"));
    assert_eq!(open[1].date_to, d("2024-06-30"));
    assert_eq!(open[1].nights, 15);
}

#[test]
fn back_to_back_bookings_leave_no_gap() {
    let bookings = vec![w("2024-06-10", "2024-06-15"), w("2024-06-15", "2024-06-20")];
    let open = find_open_windows(&bookings, d("2024-06-10"), d("2024-06-20"));
    assert!(open.is_empty());
}

#[test]
fn overlapping_bookings_are_merged() {
    let bookings = vec![w("2024-06-12", "2024-06-18"), w("2024-06-10", "2024-06-14")];
    let open = find_open_windows(&bookings, d("2024-06-01"), d("2024-06-20"));

    assert_eq!(open.len(), 2);
    assert_eq!(open[0].date_to, d("2024-06-10"));
    assert_eq!(open[1].date_from, d("2024-06-18"));
    assert_eq!(open[1].nights, 2);
}

#[test]
fn bookings_outside_search_window_are_ignored() {
    let bookings = vec![w("2024-05-01", "2024-05-10"), w("2024-07-01", "2024-07-05")];
    let open = find_open_windows(&bookings, d("2024-06-01"), d("2024-06-30"));
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].nights, 29);
}

#[test]
fn booking_straddling_window_edges_is_clipped() {
    let bookings = vec![w("2024-05-28", "2024-06-03"), w("2024-06-27", "2024-07-04")];
    let open = find_open_windows(&bookings, d("2024-06-01"), d("2024-06-30"));
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].date_from, d("2024-06-03"));
    assert_eq!(open[0].date_to, d("2024-06-27"));
}

#[test]
fn empty_or_inverted_search_window_has_no_open_windows() {
    assert!(find_open_windows(&[], d("2024-06-01"), d("2024-06-01")).is_empty());
    assert!(find_open_windows(&[], d("2024-06-10"), d("2024-06-01")).is_empty());
}

#[test]
fn no_bookings_means_whole_window_is_open() {
    let open = find_open_windows(&[], d("2024-06-01"), d("2024-06-08"));
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].nights, 7);
}

#[test]
fn first_open_window_respects_minimum_nights() {
    let bookings = vec![w("2024-06-03", "2024-06-10"), w("2024-06-12", "2024-06-20")];

    // June 1-3 (2 nights), June 10-12 (2 nights), June 20-30 (10 nights)
    let first = find_first_open_window(&bookings, d("2024-06-01"), d("2024-06-30"), 3).unwrap();
    assert_eq!(first.date_from, d("2024-06-20"));

    let any = find_first_open_window(&bookings, d("2024-06-01"), d("2024-06-30"), 1).unwrap();
    assert_eq!(any.date_from, d("2024-06-01"));

    assert!(find_first_open_window(&bookings, d("2024-06-01"), d("2024-06-30"), 11).is_none());
}
