//! Calendar-aware view over the [`Store`].
//!
//! The tracker owns the store (handed in at construction, never a global)
//! and translates civil-date semantics -- "today", future-date gating, the
//! per-month chart series -- into store reads and writes. This is the whole
//! surface a presentation layer needs.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date::{self, Clock, SystemClock};
use crate::error::{Result, StoreError, ValidationError};
use crate::storage::Store;

/// One day of a month series.
///
/// Future days carry `count: 0` and `plottable: false`: they reserve x-axis
/// spacing in a chart but must not be drawn as data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayPoint {
    pub day: u32,
    pub count: u32,
    pub plottable: bool,
}

/// Per-day counts for one month, one entry per calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSeries {
    pub year: i32,
    pub month: u32,
    pub points: Vec<DayPoint>,
}

impl MonthSeries {
    /// Largest count in the series, for chart scaling.
    pub fn max_count(&self) -> u32 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }

    /// The days eligible for rendering (today or earlier).
    pub fn plottable_points(&self) -> impl Iterator<Item = &DayPoint> {
        self.points.iter().filter(|p| p.plottable)
    }
}

/// Parse manual-edit input as a non-negative count.
///
/// # Errors
/// Rejects non-numeric and negative input; the store is never reached.
pub fn parse_count(input: &str) -> Result<u32, ValidationError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidCount(input.to_string()))
}

/// Date-keyed count tracking over an owned [`Store`].
pub struct Tracker<C: Clock = SystemClock> {
    store: Store,
    clock: C,
}

impl Tracker<SystemClock> {
    /// Wrap a store using the device-local wall clock.
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<C: Clock> Tracker<C> {
    /// Wrap a store with an explicit clock (tests pin the calendar here).
    pub fn with_clock(store: Store, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Today per the tracker's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Canonical store key for today.
    pub fn today_key(&self) -> String {
        date::date_key(self.today())
    }

    /// Count recorded for `date`, 0 if none.
    pub fn count_for(&self, date: NaiveDate) -> u32 {
        self.store.get(date)
    }

    /// Add `amount` to today's count and return the new total.
    ///
    /// Not idempotent: every call increments.
    ///
    /// # Errors
    /// Returns an error if the primary write fails.
    pub fn add_to_today(&mut self, amount: u32) -> Result<u32, StoreError> {
        let today = self.today();
        let new_count = self.store.get(today).saturating_add(amount);
        self.store.set(today, new_count)?;
        Ok(new_count)
    }

    /// Set the count for `date` from a manual edit.
    ///
    /// # Errors
    /// Rejects future dates without touching the store; propagates primary
    /// write failures.
    pub fn set_count(&mut self, date: NaiveDate, count: u32) -> Result<()> {
        if self.is_future(date) {
            return Err(ValidationError::FutureDate(date).into());
        }
        self.store.set(date, count)?;
        Ok(())
    }

    /// The (day, count) series for one month, recomputed on every call.
    ///
    /// Always `days_in_month` entries long; days after today are included as
    /// non-plottable zero placeholders.
    ///
    /// # Errors
    /// Returns an error for a month outside 1..=12.
    pub fn month_series(&self, year: i32, month: u32) -> Result<MonthSeries, ValidationError> {
        let days = date::days_in_month(year, month)?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ValidationError::InvalidMonth { year, month })?;
        let today = self.today();
        let points = first
            .iter_days()
            .take(days as usize)
            .map(|date| {
                if date::is_future(date, today) {
                    DayPoint {
                        day: date.day(),
                        count: 0,
                        plottable: false,
                    }
                } else {
                    DayPoint {
                        day: date.day(),
                        count: self.store.get(date),
                        plottable: true,
                    }
                }
            })
            .collect();
        Ok(MonthSeries {
            year,
            month,
            points,
        })
    }

    /// True if `date` is strictly after today.
    pub fn is_future(&self, date: NaiveDate) -> bool {
        date::is_future(date, self.today())
    }

    /// True if `date` is today.
    pub fn is_today(&self, date: NaiveDate) -> bool {
        date::is_today(date, self.today())
    }

    /// The day before `date`. Never gated; history is always reachable.
    pub fn prev_day(&self, date: NaiveDate) -> NaiveDate {
        date::prev_day(date)
    }

    /// The day after `date`, or `None` when that would be in the future.
    pub fn next_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        date::next_day_bounded(date, self.today())
    }
}
