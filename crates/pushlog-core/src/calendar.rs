//! Month grid layout and display formatting for the calendar views.

use chrono::{Datelike, NaiveDate};

use crate::date::days_in_month;
use crate::error::ValidationError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Display title for a day detail view, e.g. `"March 5, 2025"`.
pub fn format_day_title(date: NaiveDate) -> String {
    let name = month_name(date.month()).unwrap_or("");
    format!("{name} {}, {}", date.day(), date.year())
}

/// Display title for a month view, e.g. `"March 2025"`.
pub fn format_month_title(year: i32, month: u32) -> String {
    let name = month_name(month).unwrap_or("");
    format!("{name} {year}")
}

/// Cells of a Sunday-first month grid: leading `None` padding so day 1 lands
/// on its weekday column, then `Some(day)` for each day of the month.
///
/// # Errors
/// Returns an error for a month outside 1..=12.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<Option<u32>>, ValidationError> {
    let days = days_in_month(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(ValidationError::InvalidMonth { year, month })?;
    let leading = first.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity((leading + days) as usize);
    cells.extend(std::iter::repeat(None).take(leading as usize));
    cells.extend((1..=days).map(Some));
    Ok(cells)
}
