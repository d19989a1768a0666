//! Core error types for pushlog-core.
//!
//! This module defines the error hierarchy using thiserror. Storage-level
//! failures, input validation failures, and backup import failures are kept
//! as separate enums so callers can match on the class they care about.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pushlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backup import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the count database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for user-supplied dates and counts.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Count input that is not a non-negative integer
    #[error("Invalid count '{0}': expected a non-negative integer")]
    InvalidCount(String),

    /// Date key not in canonical YYYY-MM-DD form
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDateKey(String),

    /// Month outside 1..=12
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },

    /// Edit attempted on a date after today
    #[error("Date {0} is in the future and cannot be edited")]
    FutureDate(chrono::NaiveDate),
}

/// Errors from importing a user backup batch.
///
/// Imports are all-or-nothing: any of these means the store was left
/// untouched.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The batch was not valid JSON of the expected shape
    #[error("Failed to parse backup: {0}")]
    Parse(String),

    /// A structurally valid batch contained a bad entry
    #[error("Invalid backup entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Applying the batch to the store failed
    #[error("Store error during import: {0}")]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
