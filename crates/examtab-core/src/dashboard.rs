//! The live display loop.
//!
//! Single-threaded and cooperative: one `select!` loop drives the two
//! startup loads and the two periodic refreshes. The first frame is drawn
//! from whatever the selector already holds (fallback catalog, default
//! custom exam); each load redraws when it lands. A render failure in one
//! refresh is logged and never stops the other.

use std::future::Future;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::clock::ClockFace;
use crate::error::CoreError;
use crate::exam::{ExamCatalog, ExamFeed, FallbackDates};
use crate::selector::{CountdownView, ExamSelector};
use crate::storage::KeyValueStore;

/// Presentation layer fed by the dashboard.
pub trait RenderSink {
    fn render_countdown(&mut self, view: &CountdownView) -> Result<(), CoreError>;

    fn render_clock(&mut self, face: &ClockFace) -> Result<(), CoreError>;
}

/// Source of wall-clock "now".
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Counters from one [`Dashboard::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub countdown_renders: u64,
    pub clock_renders: u64,
    pub failed_renders: u64,
}

pub struct Dashboard<S, C> {
    selector: ExamSelector<S>,
    clock: C,
    period: Duration,
    fallback: FallbackDates,
    summary: RunSummary,
}

impl<S: KeyValueStore, C: Clock> Dashboard<S, C> {
    pub fn new(
        selector: ExamSelector<S>,
        clock: C,
        period: Duration,
        fallback: FallbackDates,
    ) -> Self {
        Self {
            selector,
            clock,
            period,
            fallback,
            summary: RunSummary::default(),
        }
    }

    pub fn selector(&self) -> &ExamSelector<S> {
        &self.selector
    }

    pub fn into_selector(self) -> ExamSelector<S> {
        self.selector
    }

    /// Run until `shutdown` resolves.
    ///
    /// The catalog is fetched from `feed`; the custom exam is read from the
    /// selector's store unless it was already loaded.
    pub async fn run<F, R, D>(&mut self, sink: &mut R, feed: &F, shutdown: D) -> RunSummary
    where
        F: ExamFeed,
        R: RenderSink,
        D: Future<Output = ()>,
    {
        self.summary = RunSummary::default();

        let fallback = self.fallback;
        let catalog_load = ExamCatalog::load(feed, &fallback);
        tokio::pin!(catalog_load);
        tokio::pin!(shutdown);
        let mut catalog_pending = true;
        let mut custom_pending = !self.selector.readiness().custom;

        let start = Instant::now() + self.period;
        let mut clock_interval = interval_at(start, self.period);
        let mut countdown_interval = interval_at(start, self.period);
        clock_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        countdown_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // First frame, before either load has completed.
        self.refresh_clock(sink);
        self.refresh_countdown(sink);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                catalog = &mut catalog_load, if catalog_pending => {
                    catalog_pending = false;
                    self.selector.apply_catalog(catalog);
                    self.refresh_countdown(sink);
                }
                _ = std::future::ready(()), if custom_pending => {
                    custom_pending = false;
                    self.selector.load_custom();
                    self.refresh_countdown(sink);
                }
                _ = clock_interval.tick() => self.refresh_clock(sink),
                _ = countdown_interval.tick() => self.refresh_countdown(sink),
            }
        }

        self.summary
    }

    fn refresh_clock<R: RenderSink>(&mut self, sink: &mut R) {
        let face = ClockFace::at(self.clock.now());
        match sink.render_clock(&face) {
            Ok(()) => self.summary.clock_renders += 1,
            Err(e) => {
                self.summary.failed_renders += 1;
                tracing::warn!(error = %e, "clock render failed");
            }
        }
    }

    fn refresh_countdown<R: RenderSink>(&mut self, sink: &mut R) {
        let view = self.selector.tick(self.clock.now());
        match sink.render_countdown(&view) {
            Ok(()) => self.summary.countdown_renders += 1,
            Err(e) => {
                self.summary.failed_renders += 1;
                tracing::warn!(error = %e, "countdown render failed");
            }
        }
    }
}
