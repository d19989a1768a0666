use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "pushlog", version, about = "Pushlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's total
    Today,
    /// Record pushups for today (configured increment by default)
    Add {
        /// Override the configured increment
        #[arg(long)]
        count: Option<u32>,
    },
    /// Set the count for a date (YYYY-MM-DD)
    Set {
        date: String,
        #[arg(allow_hyphen_values = true)]
        count: String,
    },
    /// Show one day with navigation hints
    Day {
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// Show the monthly series
    Month {
        year: Option<i32>,
        month: Option<u32>,
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
        /// Print a Sunday-first calendar grid instead of the chart
        #[arg(long)]
        grid: bool,
    },
    /// Export a backup batch to stdout
    Export,
    /// Import a backup batch from a file
    Import { file: PathBuf },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today => commands::track::run_today(),
        Commands::Add { count } => commands::track::run_add(count),
        Commands::Set { date, count } => commands::track::run_set(&date, &count),
        Commands::Day { date } => commands::track::run_day(date.as_deref()),
        Commands::Month {
            year,
            month,
            json,
            grid,
        } => commands::month::run(year, month, json, grid),
        Commands::Export => commands::backup::run_export(),
        Commands::Import { file } => commands::backup::run_import(&file),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
