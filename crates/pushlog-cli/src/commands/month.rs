//! Monthly views: the trend chart and the calendar grid.

use chrono::Datelike;
use pushlog_core::calendar::{format_month_title, month_grid};
use pushlog_core::{Config, MonthSeries};

use crate::common::open_tracker;

const CHART_WIDTH: u32 = 30;

pub fn run(
    year: Option<i32>,
    month: Option<u32>,
    json: bool,
    grid: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(&Config::load_or_default())?;
    let today = tracker.today();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let series = tracker.month_series(year, month)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!("{}", format_month_title(year, month));
    if grid {
        render_grid(year, month, &series)?;
    } else {
        render_chart(&series);
    }
    Ok(())
}

/// One line per day: a horizontal bar scaled to the month's maximum.
/// Future days get no bar at all, only their axis slot.
fn render_chart(series: &MonthSeries) {
    let max = series.max_count().max(1);
    for point in &series.points {
        if point.plottable {
            let width = (u64::from(point.count) * u64::from(CHART_WIDTH) / u64::from(max)) as usize;
            println!("{:>2} | {:<w$} {}", point.day, "#".repeat(width), point.count, w = CHART_WIDTH as usize);
        } else {
            println!("{:>2} |", point.day);
        }
    }
}

/// Sunday-first calendar grid with the count under each day.
fn render_grid(year: i32, month: u32, series: &MonthSeries) -> Result<(), Box<dyn std::error::Error>> {
    println!("  Su   Mo   Tu   We   Th   Fr   Sa");
    let cells = month_grid(year, month)?;
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        match cell {
            Some(day) => {
                let point = &series.points[(*day - 1) as usize];
                if point.plottable {
                    line.push_str(&format!("{:>2}:{:<2}", day, point.count));
                } else {
                    line.push_str(&format!("{:>2}:  ", day));
                }
            }
            None => line.push_str("     "),
        }
        if (i + 1) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        } else {
            line.push(' ');
        }
    }
    if !line.trim().is_empty() {
        println!("{}", line.trim_end());
    }
    Ok(())
}
