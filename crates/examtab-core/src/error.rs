//! Core error types for examtab-core.
//!
//! Every failure in the countdown subsystem has a defined fallback, so most
//! of these never reach the user: the catalog swallows [`FetchError`] into
//! its fallback dates and the custom exam store turns [`StorageError`] into
//! a `false` return. They exist so the recovery points can log precisely.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for examtab-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistent key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Remote exam feed errors
    #[error("Remote feed error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Render sink failures
    #[error("Render error: {0}")]
    Render(String),
}

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage capability is not present at all
    #[error("Storage is unavailable")]
    Unavailable,

    /// Failed to open the backing database
    #[error("Failed to open storage at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be resolved
    #[error("Storage location unavailable: {0}")]
    Location(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored value could not be encoded/decoded
    #[error("Malformed value under '{key}': {message}")]
    Malformed { key: String, message: String },

    /// Database is locked
    #[error("Storage is locked")]
    Locked,
}

/// Failures of the remote exam feed. Recovered by the catalog fallback.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-success HTTP status
    #[error("Failed to fetch exam data: {status}")]
    Status { status: u16 },

    /// Body was not the expected JSON shape
    #[error("Malformed exam feed: {0}")]
    Decode(String),

    /// An entry carried an unparsable date
    #[error("Invalid date in feed entry '{name}': {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: ValidationError,
    },
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date string not in `DD-MM-YYYY` form
    #[error("Invalid date '{input}': expected DD-MM-YYYY")]
    DateFormat { input: String },

    /// Date components do not name a real calendar day
    #[error("Invalid calendar date: day {day}, month {month}, year {year}")]
    CalendarDate { day: u32, month: u32, year: i32 },

    /// Unknown exam identifier
    #[error("Unknown exam id '{0}' (expected one of: jee, neet, jeeAdv, custom)")]
    UnknownExam(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
