//! # Pushlog Core Library
//!
//! This library provides the core logic for Pushlog, a single-user daily
//! pushup tracker. It implements a CLI-first philosophy where all operations
//! are available via a standalone CLI binary, with any GUI being a thin
//! presentation layer over the same core library.
//!
//! ## Architecture
//!
//! - **Store**: SQLite-backed mapping from canonical `YYYY-MM-DD` keys to
//!   counts, mirrored best-effort to a JSON backup file
//! - **Tracker**: calendar semantics over the store -- today's count, manual
//!   edits with validation, the per-month chart series, future-date gating
//! - **Calendar**: month grid layout and display formatting
//!
//! ## Key Components
//!
//! - [`Store`]: count persistence, mirror, backup export/import
//! - [`Tracker`]: the entire surface a presentation layer needs
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod date;
pub mod error;
pub mod storage;
pub mod tracker;

pub use date::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, ImportError, StoreError, ValidationError};
pub use storage::{BackupEntry, Config, Store};
pub use tracker::{parse_count, DayPoint, MonthSeries, Tracker};
