//! SQLite-backed key-value storage.
//!
//! A single `kv` table holding JSON-encoded values, standing in for the
//! browser's synced extension storage.

use std::path::Path;

use rusqlite::{params, Connection};
use serde_json::Value;

use super::data_dir;
use super::kv::KeyValueStore;
use crate::error::StorageError;

/// SQLite database for persisted exam state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/examtab.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::Location(e.to_string()))?;
        Self::open_at(&dir.join("examtab.db"))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a raw value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a raw value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let Some(raw) = self.kv_get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Malformed {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.kv_set(key, &value.to_string())?;
        Ok(())
    }

    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::CustomExamStore;
    use crate::storage::kv::{ACTIVE_EXAM_KEY, CUSTOM_EXAM_DATE_KEY, CUSTOM_EXAM_NAME_KEY};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get(ACTIVE_EXAM_KEY).unwrap(), None);
        db.kv_set(ACTIVE_EXAM_KEY, "\"neet\"").unwrap();
        assert_eq!(
            db.kv_get(ACTIVE_EXAM_KEY).unwrap().as_deref(),
            Some("\"neet\"")
        );
    }

    #[test]
    fn json_values_roundtrip_through_sqlite() {
        let db = Database::open_memory().unwrap();
        db.set(CUSTOM_EXAM_DATE_KEY, json!(1_780_000_000_000_i64)).unwrap();
        db.set(CUSTOM_EXAM_DATE_KEY, Value::Null).unwrap();
        assert_eq!(db.get(CUSTOM_EXAM_DATE_KEY).unwrap(), Some(Value::Null));
        db.set("exams", json!([{"name": "neet", "default": true}])).unwrap();
        assert_eq!(
            db.get("exams").unwrap(),
            Some(json!([{"name": "neet", "default": true}]))
        );
    }

    #[test]
    fn undecodable_value_is_malformed() {
        let db = Database::open_memory().unwrap();
        db.kv_set(CUSTOM_EXAM_NAME_KEY, "not json").unwrap();
        assert!(matches!(
            db.get(CUSTOM_EXAM_NAME_KEY),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn open_at_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examtab.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.set(ACTIVE_EXAM_KEY, json!("jee")).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get(ACTIVE_EXAM_KEY).unwrap(), Some(json!("jee")));
    }

    #[test]
    fn custom_exam_write_is_one_transaction() {
        let db = Database::open_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2027, 5, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut store = CustomExamStore::new(&db);
        assert!(store.save(Some("BITSAT"), Some(date)));

        db.conn
            .execute_batch(
                "CREATE TRIGGER reject_date BEFORE INSERT ON kv
                 WHEN NEW.key = 'customExamDate'
                 BEGIN SELECT RAISE(ABORT, 'read-only'); END;",
            )
            .unwrap();
        assert!(!store.save(Some("Olympiad"), None));

        let mut fresh = CustomExamStore::new(&db);
        let record = fresh.load().clone();
        assert_eq!(record.name, "BITSAT");
        assert_eq!(record.date, Some(date));
    }
}
