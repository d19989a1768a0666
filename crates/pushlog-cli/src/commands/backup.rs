//! Backup export and import.

use std::path::Path;

use pushlog_core::Config;

use crate::common::open_tracker;

pub fn run_export() -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(&Config::load_or_default())?;
    println!("{}", tracker.store().export_all()?);
    Ok(())
}

pub fn run_import(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let batch = std::fs::read_to_string(file)?;
    let mut tracker = open_tracker(&Config::load_or_default())?;
    let imported = tracker.store_mut().import_all(&batch)?;
    println!("Imported {imported} entries");
    Ok(())
}
