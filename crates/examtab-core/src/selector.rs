//! Active exam selection and per-tick countdown views.
//!
//! The selector owns all countdown state: the catalog, the custom exam store
//! and the active identifier. Every tick is a full recompute from the `now`
//! it is given; there is no running decrement to drift.
//!
//! ## States
//!
//! ```text
//! jee <-> neet <-> jeeAdv <-> custom      (set_active, any to any)
//! ```
//!
//! "Arrived" is not a selector state. It is read off the computed
//! [`CountdownResult`] of whichever exam is active.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::countdown::{self, CountdownResult};
use crate::exam::{CustomExamStore, ExamCatalog, ExamId, DEFAULT_CUSTOM_NAME};
use crate::storage::kv::{KeyValueStore, ACTIVE_EXAM_KEY, EXAMS_KEY};

/// Completion signals for the two startup loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub catalog: bool,
    pub custom: bool,
}

impl Readiness {
    pub fn is_complete(&self) -> bool {
        self.catalog && self.custom
    }
}

/// What the presentation layer renders for one exam on one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownView {
    pub exam_id: ExamId,
    pub display_name: String,
    pub countdown: CountdownResult,
    pub label: String,
    pub ready: Readiness,
}

impl CountdownView {
    pub fn is_arrived(&self) -> bool {
        self.countdown.is_arrived()
    }
}

/// Tracks the active exam and computes its countdown.
pub struct ExamSelector<S> {
    active: ExamId,
    catalog: ExamCatalog,
    custom: CustomExamStore<S>,
    show_seconds: bool,
    catalog_ready: bool,
}

impl<S: KeyValueStore> ExamSelector<S> {
    /// A selector over not-yet-loaded data.
    ///
    /// `catalog` is normally the fallback catalog and `custom` an unloaded
    /// store, so a view can be rendered before either load completes.
    pub fn new(catalog: ExamCatalog, custom: CustomExamStore<S>) -> Self {
        Self {
            active: ExamId::default(),
            catalog,
            custom,
            show_seconds: true,
            catalog_ready: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn active(&self) -> ExamId {
        self.active
    }

    pub fn catalog(&self) -> &ExamCatalog {
        &self.catalog
    }

    pub fn custom(&self) -> &CustomExamStore<S> {
        &self.custom
    }

    pub fn show_seconds(&self) -> bool {
        self.show_seconds
    }

    pub fn readiness(&self) -> Readiness {
        Readiness {
            catalog: self.catalog_ready,
            custom: self.custom.is_loaded(),
        }
    }

    /// Target date for `id`, if one is known.
    pub fn target(&self, id: ExamId) -> Option<NaiveDateTime> {
        match id {
            ExamId::Custom => self.custom.record().date,
            built_in => self.catalog.get(built_in),
        }
    }

    /// Recompute the active exam's view against `now`.
    pub fn tick(&self, now: NaiveDateTime) -> CountdownView {
        let view = self.view_of(self.active, now);
        tracing::debug!(
            exam = %view.exam_id,
            total_ms = view.countdown.total_millis,
            "countdown recomputed"
        );
        view
    }

    /// View for any exam, active or not.
    ///
    /// An exam without a date (an invalid custom exam, or a built-in the
    /// feed omitted) yields a zero result with `total_millis = 0`.
    pub fn view_of(&self, id: ExamId, now: NaiveDateTime) -> CountdownView {
        let (display_name, countdown) = match (id, self.target(id)) {
            (ExamId::Custom, Some(date)) if self.custom.is_valid() => (
                self.custom.record().name.clone(),
                countdown::remaining(date, now, self.show_seconds),
            ),
            (ExamId::Custom, _) => (
                DEFAULT_CUSTOM_NAME.to_string(),
                CountdownResult::arrived(0, self.show_seconds),
            ),
            (built_in, Some(date)) => (
                built_in.display_name().to_string(),
                countdown::remaining(date, now, self.show_seconds),
            ),
            (built_in, None) => (
                built_in.display_name().to_string(),
                CountdownResult::arrived(0, self.show_seconds),
            ),
        };

        let label = if countdown.is_arrived() {
            format!("{display_name} Exam Day Has Arrived!")
        } else {
            format!("{display_name} Countdown")
        };

        CountdownView {
            exam_id: id,
            display_name,
            countdown,
            label,
            ready: self.readiness(),
        }
    }

    /// Views for every exam that has a date, in [`ExamId::ALL`] order.
    pub fn overview(&self, now: NaiveDateTime) -> Vec<CountdownView> {
        ExamId::ALL
            .into_iter()
            .filter(|id| match id {
                ExamId::Custom => self.custom.is_valid(),
                built_in => self.catalog.get(*built_in).is_some(),
            })
            .map(|id| self.view_of(id, now))
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch the active exam, persist the choice and recompute immediately.
    ///
    /// A failed write is logged; the switch still takes effect.
    pub fn set_active(&mut self, id: ExamId, now: NaiveDateTime) -> CountdownView {
        self.active = id;
        let store = self.custom.store();
        if store.is_available() {
            if let Err(e) = store.set(ACTIVE_EXAM_KEY, Value::String(id.as_str().to_string())) {
                tracing::warn!(error = %e, exam = %id, "failed to persist active exam");
            }
        }
        self.tick(now)
    }

    /// Pick the initial active exam from storage.
    ///
    /// Precedence: a stored `activeExam` naming a known exam, then the entry
    /// flagged `default` in the stored `exams` array, then JEE Advanced.
    pub fn restore(&mut self) -> ExamId {
        self.active = self.stored_active().unwrap_or_default();
        self.active
    }

    /// Install the resolved catalog and raise the catalog-ready signal.
    pub fn apply_catalog(&mut self, catalog: ExamCatalog) {
        self.catalog = catalog;
        self.catalog_ready = true;
    }

    /// Read the persisted custom exam and raise the custom-ready signal.
    pub fn load_custom(&mut self) {
        self.custom.load();
    }

    /// Replace the custom exam.
    pub fn save_custom(&mut self, name: Option<&str>, date: Option<NaiveDateTime>) -> bool {
        self.custom.save(name, date)
    }

    pub fn set_show_seconds(&mut self, show: bool) {
        self.show_seconds = show;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn stored_active(&self) -> Option<ExamId> {
        let store = self.custom.store();
        if !store.is_available() {
            return None;
        }

        match store.get(ACTIVE_EXAM_KEY) {
            Ok(Some(Value::String(id))) => match id.parse() {
                Ok(id) => return Some(id),
                Err(e) => tracing::warn!(error = %e, "ignoring stored active exam"),
            },
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Error reading active exam"),
        }

        match store.get(EXAMS_KEY) {
            Ok(Some(Value::Array(exams))) => exams
                .iter()
                .find(|e| e.get("default").and_then(Value::as_bool).unwrap_or(false))
                .and_then(exam_id_of),
            Ok(_) => None,
            Err(e) => {
                tracing::error!(error = %e, "Error setting default exam");
                None
            }
        }
    }
}

/// Identifier of an `exams` array entry, by its `id` or `name` field.
fn exam_id_of(entry: &Value) -> Option<ExamId> {
    ["id", "name"]
        .into_iter()
        .filter_map(|field| entry.get(field).and_then(Value::as_str))
        .find_map(|s| s.parse().ok().or_else(|| ExamId::from_feed_name(s)))
}
