//! # Examtab Core Library
//!
//! Exam countdown logic behind the Examtab new-tab page and CLI: which exams
//! exist, when they are, and how long is left.
//!
//! ## Architecture
//!
//! - **Exam catalog**: built-in exam dates resolved from a remote JSON feed,
//!   falling back wholesale to configured dates on any failure
//! - **Custom exam store**: one user-defined exam persisted through an
//!   injected key-value capability
//! - **Countdown**: pure `target - now` decomposition into months (30 days),
//!   days, hours, minutes and seconds
//! - **Selector**: the active exam and its per-tick view
//! - **Dashboard**: the cooperative 1-second refresh loop
//!
//! ## Key Components
//!
//! - [`ExamCatalog`]: Built-in exam dates
//! - [`CustomExamStore`]: Persisted custom exam
//! - [`ExamSelector`]: Active exam state machine
//! - [`Dashboard`]: Live display loop over a [`RenderSink`]
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod exam;
pub mod selector;
pub mod storage;

pub use clock::ClockFace;
pub use countdown::{format_time, CountdownResult};
pub use dashboard::{Clock, Dashboard, RenderSink, RunSummary, SystemClock};
pub use error::{ConfigError, CoreError, FetchError, StorageError, ValidationError};
pub use exam::{
    CatalogSource, CustomExamRecord, CustomExamStore, ExamCatalog, ExamFeed, ExamId,
    FallbackDates, HttpExamFeed, OfflineFeed, RemoteExam,
};
pub use selector::{CountdownView, ExamSelector, Readiness};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
