//! SQLite-backed count store with a JSON file mirror.
//!
//! The primary store is a single `counts` table mapping canonical date keys
//! to pushup counts. Every write is mirrored whole-file to a JSON object
//! (`{ "YYYY-MM-DD": count }`) so the data survives a lost or corrupted
//! database. The mirror is a safety net only: mirror I/O failures are
//! recorded on [`Store::last_mirror_error`] and logged, never propagated,
//! and reads never touch it outside of an explicit restore.

use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::date::{date_key, parse_date_key};
use crate::error::{ImportError, StoreError};

/// One entry of a user-facing backup batch.
///
/// `pushups` is deserialized as a signed integer so that a negative value in
/// an imported file is reported as an invalid entry rather than a bare JSON
/// type error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEntry {
    pub date: String,
    pub pushups: i64,
}

/// Durable mapping from canonical date key to non-negative count.
pub struct Store {
    conn: Connection,
    mirror_path: Option<PathBuf>,
    last_mirror_error: Option<String>,
}

impl Store {
    /// Open the store in the pushlog data directory.
    ///
    /// Creates `pushlog.db` and its schema if they don't exist. The mirror
    /// lives next to it as `pushup_data.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir()?;
        Self::open_at(dir.join("pushlog.db"), Some(dir.join("pushup_data.json")))
    }

    /// Open the store at explicit paths. `mirror_path = None` disables the
    /// mirror entirely.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(db_path: PathBuf, mirror_path: Option<PathBuf>) -> Result<Self, StoreError> {
        let conn = Connection::open(&db_path).map_err(|source| StoreError::OpenFailed {
            path: db_path,
            source,
        })?;
        let store = Self {
            conn,
            mirror_path,
            last_mirror_error: None,
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store with no mirror (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            mirror_path: None,
            last_mirror_error: None,
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS counts (
                date    TEXT PRIMARY KEY,
                pushups INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Count for `date`, defaulting to 0 for dates never written.
    ///
    /// Never fails: storage errors degrade to a zero read and are logged.
    pub fn get(&self, date: NaiveDate) -> u32 {
        let result = self.conn.query_row(
            "SELECT pushups FROM counts WHERE date = ?1",
            params![date_key(date)],
            |row| row.get::<_, u32>(0),
        );
        match result {
            Ok(count) => count,
            Err(rusqlite::Error::QueryReturnedNoRows) => 0,
            Err(e) => {
                log::warn!("count read failed for {}: {e}", date_key(date));
                0
            }
        }
    }

    /// Set the count for `date`, overwriting any prior value, then mirror.
    ///
    /// # Errors
    /// Returns an error if the primary write fails. Mirror failures are
    /// swallowed and recorded on [`Store::last_mirror_error`].
    pub fn set(&mut self, date: NaiveDate, count: u32) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO counts (date, pushups) VALUES (?1, ?2)",
            params![date_key(date), count],
        )?;
        self.write_mirror();
        Ok(())
    }

    /// All stored entries in enumeration order.
    ///
    /// Rows whose key is not a canonical date (which only a hand-edited
    /// database can produce) are skipped with a warning.
    pub fn entries(&self) -> Result<Vec<(NaiveDate, u32)>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT date, pushups FROM counts")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, count) = row?;
            match parse_date_key(&key) {
                Ok(date) => entries.push((date, count)),
                Err(_) => log::warn!("skipping non-canonical store key '{key}'"),
            }
        }
        Ok(entries)
    }

    /// Export all entries with count > 0 as a JSON backup batch.
    ///
    /// Zero-count entries are the default state and are omitted.
    ///
    /// # Errors
    /// Returns an error if the store cannot be enumerated.
    pub fn export_all(&self) -> Result<String, StoreError> {
        let batch: Vec<BackupEntry> = self
            .entries()?
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(date, count)| BackupEntry {
                date: date_key(date),
                pushups: i64::from(count),
            })
            .collect();
        serde_json::to_string(&batch).map_err(|e| StoreError::QueryFailed(e.to_string()))
    }

    /// Import a JSON backup batch, all-or-nothing.
    ///
    /// The whole batch is parsed and validated before anything is written;
    /// a single malformed date, missing field, or negative count rejects the
    /// import and leaves the store untouched. Entries are applied in one
    /// transaction and the mirror is rewritten afterwards.
    ///
    /// Returns the number of entries imported.
    ///
    /// # Errors
    /// Returns an error if the batch is malformed or the write fails.
    pub fn import_all(&mut self, json: &str) -> Result<usize, ImportError> {
        let batch: Vec<BackupEntry> =
            serde_json::from_str(json).map_err(|e| ImportError::Parse(e.to_string()))?;

        let mut validated = Vec::with_capacity(batch.len());
        for (index, entry) in batch.iter().enumerate() {
            let date = parse_date_key(&entry.date).map_err(|_| ImportError::InvalidEntry {
                index,
                reason: format!("invalid date '{}'", entry.date),
            })?;
            let count = u32::try_from(entry.pushups).map_err(|_| ImportError::InvalidEntry {
                index,
                reason: format!("invalid pushup count {}", entry.pushups),
            })?;
            validated.push((date, count));
        }

        let imported = validated.len();
        let tx = self.conn.transaction().map_err(StoreError::from)?;
        for (date, count) in validated {
            tx.execute(
                "INSERT OR REPLACE INTO counts (date, pushups) VALUES (?1, ?2)",
                params![date_key(date), count],
            )
            .map_err(StoreError::from)?;
        }
        tx.commit().map_err(StoreError::from)?;

        self.write_mirror();
        Ok(imported)
    }

    /// Fill the primary store from the mirror file, if it exists and parses.
    ///
    /// Called once at startup. Only dates absent from the primary are taken
    /// from the mirror: the primary is the source of truth, and a mirror
    /// that went stale (for example while mirroring was disabled) must never
    /// roll back newer counts. A missing, unreadable, or malformed mirror is
    /// a silent no-op; the mirror is recovery data and must never take the
    /// app down. A mirror containing any invalid entry is ignored wholesale.
    pub fn restore_from_mirror(&mut self) {
        let Some(path) = self.mirror_path.clone() else {
            return;
        };
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("no mirror to restore from at {}: {e}", path.display());
                return;
            }
        };
        let raw: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&content)
        {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("mirror at {} is malformed, ignoring: {e}", path.display());
                return;
            }
        };

        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in &raw {
            let (Ok(date), Some(count)) = (parse_date_key(key), value.as_u64()) else {
                log::warn!("mirror entry '{key}' is invalid, ignoring mirror");
                return;
            };
            let Ok(count) = u32::try_from(count) else {
                log::warn!("mirror entry '{key}' is out of range, ignoring mirror");
                return;
            };
            entries.push((date, count));
        }

        let result = (|| -> Result<usize, rusqlite::Error> {
            let tx = self.conn.transaction()?;
            let mut applied = 0;
            for (date, count) in entries {
                applied += tx.execute(
                    "INSERT OR IGNORE INTO counts (date, pushups) VALUES (?1, ?2)",
                    params![date_key(date), count],
                )?;
            }
            tx.commit()?;
            Ok(applied)
        })();
        match result {
            Ok(applied) => log::debug!("restored {applied} entries from mirror"),
            Err(e) => log::warn!("mirror restore failed: {e}"),
        }
    }

    /// The error from the most recent mirror write, if it failed.
    ///
    /// Cleared by the next successful mirror write.
    pub fn last_mirror_error(&self) -> Option<&str> {
        self.last_mirror_error.as_deref()
    }

    /// Rewrite the mirror file from the primary store, best-effort.
    fn write_mirror(&mut self) {
        let Some(path) = self.mirror_path.clone() else {
            return;
        };
        let result = self.entries().map(|entries| {
            let mut map = serde_json::Map::new();
            for (date, count) in entries {
                map.insert(date_key(date), serde_json::Value::from(count));
            }
            serde_json::Value::Object(map).to_string()
        });
        let outcome = match result {
            Ok(json) => std::fs::write(&path, json).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match outcome {
            Ok(()) => self.last_mirror_error = None,
            Err(e) => {
                log::warn!("mirror write to {} failed: {e}", path.display());
                self.last_mirror_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn unwritten_date_reads_zero() {
        let store = Store::open_memory().unwrap();
        assert_eq!(store.get(d(2025, 3, 14)), 0);
    }

    #[test]
    fn set_then_get() {
        let mut store = Store::open_memory().unwrap();
        store.set(d(2025, 3, 14), 30).unwrap();
        assert_eq!(store.get(d(2025, 3, 14)), 30);
    }

    #[test]
    fn set_overwrites_prior_value() {
        let mut store = Store::open_memory().unwrap();
        store.set(d(2025, 3, 14), 30).unwrap();
        store.set(d(2025, 3, 14), 45).unwrap();
        assert_eq!(store.get(d(2025, 3, 14)), 45);
    }

    #[test]
    fn export_omits_zero_counts() {
        let mut store = Store::open_memory().unwrap();
        store.set(d(2025, 3, 14), 20).unwrap();
        store.set(d(2025, 3, 15), 0).unwrap();
        let batch: Vec<BackupEntry> = serde_json::from_str(&store.export_all().unwrap()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].date, "2025-03-14");
        assert_eq!(batch[0].pushups, 20);
    }

    #[test]
    fn import_rejects_negative_count_and_leaves_store_untouched() {
        let mut store = Store::open_memory().unwrap();
        store.set(d(2025, 3, 1), 10).unwrap();
        let batch = r#"[{"date":"2025-03-02","pushups":20},{"date":"2025-03-03","pushups":-5}]"#;
        let err = store.import_all(batch).unwrap_err();
        assert!(matches!(err, ImportError::InvalidEntry { index: 1, .. }));
        assert_eq!(store.get(d(2025, 3, 1)), 10);
        assert_eq!(store.get(d(2025, 3, 2)), 0);
    }

    #[test]
    fn import_rejects_malformed_date() {
        let mut store = Store::open_memory().unwrap();
        let batch = r#"[{"date":"2025-3-2","pushups":20}]"#;
        assert!(matches!(
            store.import_all(batch),
            Err(ImportError::InvalidEntry { index: 0, .. })
        ));
    }

    #[test]
    fn import_rejects_missing_fields() {
        let mut store = Store::open_memory().unwrap();
        let batch = r#"[{"date":"2025-03-02"}]"#;
        assert!(matches!(store.import_all(batch), Err(ImportError::Parse(_))));
    }

    #[test]
    fn import_applies_valid_batch() {
        let mut store = Store::open_memory().unwrap();
        let batch = r#"[{"date":"2025-03-02","pushups":20},{"date":"2025-03-04","pushups":60}]"#;
        assert_eq!(store.import_all(batch).unwrap(), 2);
        assert_eq!(store.get(d(2025, 3, 2)), 20);
        assert_eq!(store.get(d(2025, 3, 4)), 60);
    }

    #[test]
    fn mirror_round_trips_through_restore() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("pushlog.db");
        let mirror = dir.path().join("pushup_data.json");

        let mut store = Store::open_at(db, Some(mirror.clone())).unwrap();
        store.set(d(2025, 3, 14), 40).unwrap();
        store.set(d(2025, 3, 15), 20).unwrap();
        assert!(store.last_mirror_error().is_none());

        // Fresh database, same mirror: counts come back.
        let db2 = dir.path().join("pushlog2.db");
        let mut recovered = Store::open_at(db2, Some(mirror)).unwrap();
        assert_eq!(recovered.get(d(2025, 3, 14)), 0);
        recovered.restore_from_mirror();
        assert_eq!(recovered.get(d(2025, 3, 14)), 40);
        assert_eq!(recovered.get(d(2025, 3, 15)), 20);
    }

    #[test]
    fn stale_mirror_never_rolls_back_newer_primary() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("pushlog.db");
        let mirror = dir.path().join("pushup_data.json");

        {
            let mut store = Store::open_at(db.clone(), Some(mirror.clone())).unwrap();
            store.set(d(2025, 3, 14), 10).unwrap();
        }

        // Mirroring disabled: counts land in the primary only.
        {
            let mut store = Store::open_at(db.clone(), None).unwrap();
            store.set(d(2025, 3, 14), 50).unwrap();
            store.set(d(2025, 3, 15), 20).unwrap();
        }

        // Re-enabled: restore must not resurrect the stale snapshot.
        let mut store = Store::open_at(db, Some(mirror)).unwrap();
        store.restore_from_mirror();
        assert_eq!(store.get(d(2025, 3, 14)), 50);
        assert_eq!(store.get(d(2025, 3, 15)), 20);
    }

    #[test]
    fn restore_fills_only_dates_absent_from_primary() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("pushlog.db");
        let mirror = dir.path().join("pushup_data.json");
        std::fs::write(&mirror, r#"{"2025-03-14": 10, "2025-03-15": 25}"#).unwrap();

        {
            let mut store = Store::open_at(db.clone(), None).unwrap();
            store.set(d(2025, 3, 14), 40).unwrap();
        }

        let mut store = Store::open_at(db, Some(mirror)).unwrap();
        store.restore_from_mirror();
        assert_eq!(store.get(d(2025, 3, 14)), 40);
        assert_eq!(store.get(d(2025, 3, 15)), 25);
    }

    #[test]
    fn malformed_mirror_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = dir.path().join("pushup_data.json");
        std::fs::write(&mirror, "{not json").unwrap();

        let mut store = Store::open_at(dir.path().join("pushlog.db"), Some(mirror)).unwrap();
        store.restore_from_mirror();
        assert_eq!(store.get(d(2025, 3, 14)), 0);
    }

    #[test]
    fn missing_mirror_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = dir.path().join("absent.json");
        let mut store = Store::open_at(dir.path().join("pushlog.db"), Some(mirror)).unwrap();
        store.restore_from_mirror();
    }

    #[test]
    fn unwritable_mirror_records_error_without_failing_set() {
        let dir = tempfile::tempdir().unwrap();
        // Mirror path is a directory, so the file write fails.
        let mut store =
            Store::open_at(dir.path().join("pushlog.db"), Some(dir.path().to_path_buf()))
                .unwrap();
        store.set(d(2025, 3, 14), 20).unwrap();
        assert_eq!(store.get(d(2025, 3, 14)), 20);
        assert!(store.last_mirror_error().is_some());
    }
}
