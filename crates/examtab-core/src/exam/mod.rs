//! Exam identifiers, dates and the two sources they resolve from: the
//! built-in catalog and the user's custom exam.

mod catalog;
mod custom;
pub mod date;
pub mod feed;
mod id;

pub use catalog::{CatalogSource, ExamCatalog, FallbackDates};
pub use custom::{from_epoch_millis, to_epoch_millis, CustomExamRecord, CustomExamStore};
pub use feed::{ExamFeed, HttpExamFeed, OfflineFeed, RemoteExam, StaticFeed};
pub use id::{ExamId, DEFAULT_CUSTOM_NAME};
