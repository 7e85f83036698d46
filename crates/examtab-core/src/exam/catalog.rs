//! Built-in exam dates, resolved from the remote feed or the fallback set.
//!
//! Resolution is all-or-nothing. The whole fetch + parse pipeline runs as a
//! single fallible step; any error in it discards everything parsed so far
//! and the catalog takes the complete fallback set instead.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::date::parse_date;
use super::feed::{ExamFeed, RemoteExam};
use super::id::ExamId;
use crate::error::FetchError;

/// Where the catalog's dates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Remote,
    Fallback,
}

/// Fixed fallback dates for the three built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackDates {
    pub jee_main: NaiveDateTime,
    pub neet: NaiveDateTime,
    pub jee_advanced: NaiveDateTime,
}

impl Default for FallbackDates {
    fn default() -> Self {
        let midnight = |y, m, d| {
            chrono::NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap_or_default()
        };
        Self {
            jee_main: midnight(2026, 1, 29),
            neet: midnight(2026, 5, 4),
            jee_advanced: midnight(2026, 5, 18),
        }
    }
}

/// The resolved built-in exam dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamCatalog {
    jee_main: Option<NaiveDateTime>,
    neet: Option<NaiveDateTime>,
    jee_advanced: Option<NaiveDateTime>,
    source: CatalogSource,
}

impl ExamCatalog {
    /// Catalog holding exactly the fallback dates.
    pub fn fallback(dates: &FallbackDates) -> Self {
        Self {
            jee_main: Some(dates.jee_main),
            neet: Some(dates.neet),
            jee_advanced: Some(dates.jee_advanced),
            source: CatalogSource::Fallback,
        }
    }

    /// Build a catalog from remote entries.
    ///
    /// Names are matched case-insensitively; unknown names are ignored and a
    /// built-in missing from the feed has no date. A later entry for the same
    /// exam overrides an earlier one. An unparsable date on a known exam
    /// fails the whole batch.
    pub fn from_remote(entries: &[RemoteExam]) -> Result<Self, FetchError> {
        let mut catalog = Self {
            jee_main: None,
            neet: None,
            jee_advanced: None,
            source: CatalogSource::Remote,
        };

        for entry in entries {
            let slot = match ExamId::from_feed_name(&entry.name) {
                Some(ExamId::JeeMain) => &mut catalog.jee_main,
                Some(ExamId::Neet) => &mut catalog.neet,
                Some(ExamId::JeeAdvanced) => &mut catalog.jee_advanced,
                Some(ExamId::Custom) | None => {
                    tracing::debug!(name = %entry.name, "ignoring unknown exam in feed");
                    continue;
                }
            };
            *slot = parse_date(entry.date.as_deref()).map_err(|source| {
                FetchError::InvalidEntry {
                    name: entry.name.clone(),
                    source,
                }
            })?;
        }

        Ok(catalog)
    }

    /// Fetch from `feed`, falling back to `fallback` on any failure.
    pub async fn load<F: ExamFeed>(feed: &F, fallback: &FallbackDates) -> Self {
        let resolved = match feed.fetch().await {
            Ok(entries) => Self::from_remote(&entries),
            Err(e) => Err(e),
        };

        match resolved {
            Ok(catalog) => {
                tracing::info!("Exam dates updated from remote source");
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching exam info, using fallback dates");
                Self::fallback(fallback)
            }
        }
    }

    /// Date for `id`. Always `None` for [`ExamId::Custom`], which lives in
    /// the custom exam store.
    pub fn get(&self, id: ExamId) -> Option<NaiveDateTime> {
        match id {
            ExamId::JeeMain => self.jee_main,
            ExamId::Neet => self.neet,
            ExamId::JeeAdvanced => self.jee_advanced,
            ExamId::Custom => None,
        }
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }
}
