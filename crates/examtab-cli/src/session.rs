//! Shared setup for commands: configuration, storage, feed and selector.

use examtab_core::{
    Config, CountdownView, Database, ExamCatalog, ExamFeed, ExamSelector, FallbackDates,
    FetchError, HttpExamFeed, OfflineFeed, RemoteExam,
};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Either the configured HTTP feed or no feed at all.
pub enum CliFeed {
    Http(HttpExamFeed),
    Offline(OfflineFeed),
}

impl ExamFeed for CliFeed {
    async fn fetch(&self) -> Result<Vec<RemoteExam>, FetchError> {
        match self {
            CliFeed::Http(feed) => feed.fetch().await,
            CliFeed::Offline(feed) => feed.fetch().await,
        }
    }
}

pub struct Session {
    pub config: Config,
    pub db: Database,
}

impl Session {
    pub fn open() -> CliResult<Self> {
        let config = Config::load()?;
        config.validate()?;
        let db = Database::open()?;
        Ok(Self { config, db })
    }

    pub fn fallback(&self) -> CliResult<FallbackDates> {
        Ok(self.config.fallback_dates()?)
    }

    /// The HTTP feed unless `offline` is set or the feed is disabled.
    pub fn feed(&self, offline: bool) -> CliResult<CliFeed> {
        if offline || !self.config.feed.enabled {
            return Ok(CliFeed::Offline(OfflineFeed));
        }
        let feed = HttpExamFeed::new(&self.config.feed.url, self.config.feed_timeout())?;
        Ok(CliFeed::Http(feed))
    }

    /// Selector over the fallback catalog with the custom exam loaded and
    /// the stored active exam restored.
    pub fn selector(&self) -> CliResult<ExamSelector<&Database>> {
        let mut selector = ExamSelector::new(
            ExamCatalog::fallback(&self.fallback()?),
            examtab_core::CustomExamStore::new(&self.db),
        );
        selector.set_show_seconds(self.config.display.show_seconds);
        selector.load_custom();
        selector.restore();
        Ok(selector)
    }

    /// Selector with the catalog already resolved from the feed.
    pub fn resolved_selector(&self, offline: bool) -> CliResult<ExamSelector<&Database>> {
        let feed = self.feed(offline)?;
        let fallback = self.fallback()?;
        let catalog = runtime()?.block_on(ExamCatalog::load(&feed, &fallback));
        let mut selector = self.selector()?;
        selector.apply_catalog(catalog);
        Ok(selector)
    }
}

pub fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Two-line text rendering of a view.
pub fn render_view(view: &CountdownView) -> String {
    use examtab_core::format_time;

    if view.is_arrived() {
        return view.label.clone();
    }

    let c = &view.countdown;
    let mut digits = format!(
        "{} months {} days {} hours {} minutes",
        format_time(c.months),
        format_time(c.days),
        format_time(c.hours),
        format_time(c.minutes)
    );
    if let Some(seconds) = c.seconds {
        digits.push_str(&format!(" {} seconds", format_time(seconds)));
    }
    format!("{}\n{digits}", view.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use examtab_core::{CountdownResult, ExamId, Readiness};

    fn view(total_millis: i64, seconds: Option<i64>) -> CountdownView {
        CountdownView {
            exam_id: ExamId::Neet,
            display_name: "NEET".into(),
            countdown: CountdownResult {
                total_millis,
                months: 2,
                days: 5,
                hours: 13,
                minutes: 4,
                seconds,
            },
            label: if total_millis > 0 {
                "NEET Countdown".into()
            } else {
                "NEET Exam Day Has Arrived!".into()
            },
            ready: Readiness::default(),
        }
    }

    #[test]
    fn renders_padded_digits() {
        assert_eq!(
            render_view(&view(1, Some(9))),
            "NEET Countdown\n02 months 05 days 13 hours 04 minutes 09 seconds"
        );
        assert_eq!(
            render_view(&view(1, None)),
            "NEET Countdown\n02 months 05 days 13 hours 04 minutes"
        );
    }

    #[test]
    fn arrived_renders_message_only() {
        assert_eq!(render_view(&view(0, Some(0))), "NEET Exam Day Has Arrived!");
    }
}
