mod config;
pub mod store;

pub use config::Config;
pub use store::{BackupEntry, Store};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns the pushlog data directory, creating it if needed.
///
/// Resolution order:
/// 1. `PUSHLOG_DATA_DIR`, used verbatim (tests and scripting).
/// 2. `~/.config/pushlog`, or `~/.config/pushlog-dev` when `PUSHLOG_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = if let Ok(dir) = std::env::var("PUSHLOG_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("PUSHLOG_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("pushlog-dev")
        } else {
            base_dir.join("pushlog")
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(dir)
}
