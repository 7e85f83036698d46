//! Persistent key-value capability.
//!
//! Values are JSON so the same keys and shapes work whether the backing store
//! is the SQLite `kv` table or an in-memory map.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::StorageError;

pub const CUSTOM_EXAM_NAME_KEY: &str = "customExamName";
pub const CUSTOM_EXAM_DATE_KEY: &str = "customExamDate";
pub const EXAMS_KEY: &str = "exams";
pub const ACTIVE_EXAM_KEY: &str = "activeExam";

/// Get/set storage injected into the exam stores.
pub trait KeyValueStore {
    /// Whether the capability exists at all. Writes to an unavailable store
    /// are reported as failures without being attempted.
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Write several keys as one unit: every entry lands or the store keeps
    /// its previous values.
    ///
    /// The default writes key by key and puts the previous values back when
    /// a write fails. Keys that were absent come back as `null`.
    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), StorageError> {
        let mut previous = Vec::with_capacity(entries.len());
        for (key, _) in &entries {
            previous.push((*key, self.get(key)?.unwrap_or(Value::Null)));
        }

        for (written, (key, value)) in entries.into_iter().enumerate() {
            if let Err(e) = self.set(key, value) {
                for (key, value) in previous.into_iter().take(written) {
                    if let Err(restore) = self.set(key, value) {
                        tracing::error!(key, error = %restore, "failed to restore previous value");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: Vec<(&str, Value)>) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// Stand-in for an environment with no storage capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStorage;

impl KeyValueStore for NoStorage {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
