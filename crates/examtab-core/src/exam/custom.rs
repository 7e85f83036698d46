//! The single user-defined exam.
//!
//! The in-memory record mirrors storage: read once by [`CustomExamStore::load`],
//! written through on every [`CustomExamStore::save`]. Storage failures never
//! escape; reads keep the prior record and writes report `false`.

use chrono::{Duration, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::DEFAULT_CUSTOM_NAME;
use crate::storage::kv::{KeyValueStore, CUSTOM_EXAM_DATE_KEY, CUSTOM_EXAM_NAME_KEY};

/// Name and target date of the custom exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomExamRecord {
    pub name: String,
    pub date: Option<NaiveDateTime>,
}

impl Default for CustomExamRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_CUSTOM_NAME.to_string(),
            date: None,
        }
    }
}

/// Storage-backed custom exam.
pub struct CustomExamStore<S> {
    store: S,
    record: CustomExamRecord,
    loaded: bool,
}

impl<S: KeyValueStore> CustomExamStore<S> {
    /// A store holding the default record; nothing is read until [`load`](Self::load).
    pub fn new(store: S) -> Self {
        Self {
            store,
            record: CustomExamRecord::default(),
            loaded: false,
        }
    }

    /// Read the persisted record into memory.
    ///
    /// Absent keys leave the defaults in place. Both keys are read before
    /// anything is applied; if either read fails the failure is logged and
    /// the current in-memory record is kept whole.
    pub fn load(&mut self) -> &CustomExamRecord {
        self.loaded = true;

        if !self.store.is_available() {
            tracing::debug!("storage unavailable, keeping default custom exam");
            return &self.record;
        }

        let stored = self
            .store
            .get(CUSTOM_EXAM_NAME_KEY)
            .and_then(|name| Ok((name, self.store.get(CUSTOM_EXAM_DATE_KEY)?)));
        let (name, date) = match stored {
            Ok(values) => values,
            Err(e) => {
                tracing::error!(error = %e, "Error loading custom exam data");
                return &self.record;
            }
        };

        let mut record = self.record.clone();
        if let Some(Value::String(name)) = name {
            if !name.is_empty() {
                record.name = name;
            }
        }
        match date {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => {}
                Some(ms) => {
                    record.date = from_epoch_millis(ms);
                    if record.date.is_none() {
                        tracing::warn!(ms, "stored custom exam date is out of range");
                    }
                }
                None => {
                    tracing::warn!(value = %n, "stored custom exam date is not an integer");
                    record.date = None;
                }
            },
            Some(Value::Null) | None => {}
            Some(other) => {
                tracing::warn!(value = %other, "stored custom exam date has unexpected type");
                record.date = None;
            }
        }

        self.record = record;
        &self.record
    }

    /// Replace the record and write it through.
    ///
    /// An empty or absent name becomes "Custom Exam". Name and date are
    /// written as one unit. Returns `false` when the storage capability is
    /// missing or the write fails; in both cases storage and the in-memory
    /// record keep the previous exam.
    pub fn save(&mut self, name: Option<&str>, date: Option<NaiveDateTime>) -> bool {
        if !self.store.is_available() {
            return false;
        }

        let record = CustomExamRecord {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_CUSTOM_NAME)
                .to_string(),
            date,
        };

        let date_value = record
            .date
            .map(|d| Value::from(to_epoch_millis(&d)))
            .unwrap_or(Value::Null);

        let written = self.store.set_many(vec![
            (CUSTOM_EXAM_NAME_KEY, Value::String(record.name.clone())),
            (CUSTOM_EXAM_DATE_KEY, date_value),
        ]);

        match written {
            Ok(()) => {
                self.record = record;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving custom exam data");
                false
            }
        }
    }

    /// True iff a date is set.
    ///
    /// Dates that failed to decode are stored as `None`, so a `Some` is
    /// always a real calendar instant.
    pub fn is_valid(&self) -> bool {
        self.record.date.is_some()
    }

    pub fn record(&self) -> &CustomExamRecord {
        &self.record
    }

    /// Whether [`load`](Self::load) has run.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Local wall-clock instant to epoch milliseconds.
///
/// A wall-clock time skipped by a DST transition (some zones skip
/// midnight) is read with the offset in force before the transition, so it
/// lands the same distance past the gap. Reading it back yields that later
/// wall-clock time.
pub fn to_epoch_millis(instant: &NaiveDateTime) -> i64 {
    let resolved = Local.from_local_datetime(instant).earliest().or_else(|| {
        Local
            .from_local_datetime(&(*instant - Duration::hours(1)))
            .earliest()
            .map(|d| d + Duration::hours(1))
    });
    match resolved {
        Some(d) => d.timestamp_millis(),
        None => instant.and_utc().timestamp_millis(),
    }
}

/// Epoch milliseconds to a local wall-clock instant.
pub fn from_epoch_millis(ms: i64) -> Option<NaiveDateTime> {
    Local
        .timestamp_millis_opt(ms)
        .earliest()
        .map(|d| d.naive_local())
}
