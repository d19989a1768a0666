//! Civil-date helpers and the canonical date key.
//!
//! Every date that enters or leaves the store goes through [`date_key`] /
//! [`parse_date_key`]; no other module formats or parses `YYYY-MM-DD`. The
//! key is zero-padded and month is 1-based, so two call sites can never
//! disagree on month indexing.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::ValidationError;

/// Format a civil date as its canonical store key (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Parse a canonical `YYYY-MM-DD` key back into a civil date.
///
/// Rejects anything that is not in the exact canonical form, including
/// unpadded months or days, so a round-trip through the store cannot
/// silently change a key.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    let parsed = NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDateKey(key.to_string()))?;
    if date_key(parsed) != key {
        return Err(ValidationError::InvalidDateKey(key.to_string()));
    }
    Ok(parsed)
}

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ValidationError> {
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(ValidationError::InvalidMonth { year, month });
    }
    let days = (28..=31)
        .rev()
        .find(|&d| NaiveDate::from_ymd_opt(year, month, d).is_some())
        .unwrap_or(28);
    Ok(days)
}

/// True if `date` is strictly after `today`.
pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

/// True if `date` is `today`.
pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Previous calendar day, with standard month/year rollover.
///
/// Saturates at the chrono calendar minimum, which no real entry reaches.
pub fn prev_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Next calendar day, with standard month/year rollover.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Next calendar day, or `None` when the step would land after `today`.
///
/// Used to block forward navigation into the future.
pub fn next_day_bounded(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let next = next_day(date);
    if is_future(next, today) {
        None
    } else {
        Some(next)
    }
}

/// Source of "today" for everything that compares against the current date.
///
/// Injected into [`crate::Tracker`] so tests can pin the calendar.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock in the device-local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
