//! Daily tracking commands: today, add, set, day.

use pushlog_core::calendar::format_day_title;
use pushlog_core::date::{date_key, parse_date_key};
use pushlog_core::{parse_count, Config};

use crate::common::open_tracker;

pub fn run_today() -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(&Config::load_or_default())?;
    let count = tracker.count_for(tracker.today());
    println!("Today: {count} pushups");
    Ok(())
}

pub fn run_add(count: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let amount = count.unwrap_or(config.increment);

    let mut tracker = open_tracker(&config)?;
    let total = tracker.add_to_today(amount)?;
    println!("Added {amount} pushups! Today: {total}");

    if let Some(err) = tracker.store().last_mirror_error() {
        log::warn!("backup mirror not updated: {err}");
    }
    Ok(())
}

pub fn run_set(date: &str, count: &str) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_date_key(date)?;
    let count = parse_count(count)?;

    let mut tracker = open_tracker(&Config::load_or_default())?;
    tracker.set_count(date, count)?;
    println!("{}: {count} pushups", format_day_title(date));
    Ok(())
}

pub fn run_day(date: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(&Config::load_or_default())?;
    let date = match date {
        Some(key) => parse_date_key(key)?,
        None => tracker.today(),
    };

    println!("{}", format_day_title(date));
    println!("{} pushups", tracker.count_for(date));

    let prev = date_key(tracker.prev_day(date));
    match tracker.next_day(date) {
        Some(next) => println!("prev: {prev}  next: {}", date_key(next)),
        None => println!("prev: {prev}  next: -"),
    }
    Ok(())
}
