//! Integration tests for the tracker over an on-disk store.
//!
//! Exercises the full daily workflow: add taps, manual edits, month series
//! for chart rendering, day navigation, and recovery from the mirror after
//! the database is lost.

use chrono::NaiveDate;
use pushlog_core::{FixedClock, Store, Tracker};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn daily_workflow_survives_database_loss() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = dir.path().join("pushup_data.json");
    let today = d(2025, 6, 10);

    {
        let store = Store::open_at(dir.path().join("pushlog.db"), Some(mirror.clone())).unwrap();
        let mut tracker = Tracker::with_clock(store, FixedClock(today));
        assert_eq!(tracker.add_to_today(20).unwrap(), 20);
        assert_eq!(tracker.add_to_today(20).unwrap(), 40);
        tracker.set_count(d(2025, 6, 3), 35).unwrap();
    }

    // Simulate a lost database: open a fresh one against the same mirror.
    let mut store = Store::open_at(dir.path().join("fresh.db"), Some(mirror)).unwrap();
    store.restore_from_mirror();
    let tracker = Tracker::with_clock(store, FixedClock(today));
    assert_eq!(tracker.count_for(today), 40);
    assert_eq!(tracker.count_for(d(2025, 6, 3)), 35);
}

#[test]
fn month_series_feeds_the_chart() {
    let today = d(2025, 6, 10);
    let mut tracker = Tracker::with_clock(Store::open_memory().unwrap(), FixedClock(today));
    tracker.set_count(d(2025, 6, 1), 20).unwrap();
    tracker.set_count(d(2025, 6, 5), 60).unwrap();
    tracker.add_to_today(40).unwrap();

    let series = tracker.month_series(2025, 6).unwrap();
    assert_eq!(series.points.len(), 30);
    assert_eq!(series.max_count(), 60);

    // Days 1..=10 are plottable, the rest are spacing placeholders.
    assert_eq!(series.plottable_points().count(), 10);
    let counts: Vec<u32> = series.plottable_points().map(|p| p.count).collect();
    assert_eq!(counts, vec![20, 0, 0, 0, 60, 0, 0, 0, 0, 40]);
}

#[test]
fn navigation_walks_history_but_not_the_future() {
    let today = d(2025, 3, 1);
    let tracker = Tracker::with_clock(Store::open_memory().unwrap(), FixedClock(today));

    assert_eq!(tracker.prev_day(today), d(2025, 2, 28));
    assert_eq!(tracker.next_day(d(2025, 2, 28)), Some(today));
    assert_eq!(tracker.next_day(today), None);
}

#[test]
fn edits_only_land_on_editable_dates() {
    let today = d(2025, 6, 10);
    let mut tracker = Tracker::with_clock(Store::open_memory().unwrap(), FixedClock(today));

    tracker.set_count(today, 15).unwrap();
    tracker.set_count(d(2020, 1, 1), 5).unwrap();
    assert!(tracker.set_count(d(2025, 6, 11), 5).is_err());

    assert_eq!(tracker.count_for(today), 15);
    assert_eq!(tracker.count_for(d(2020, 1, 1)), 5);
    assert_eq!(tracker.count_for(d(2025, 6, 11)), 0);
}
