//! Date and time-of-day display, refreshed independently of the countdown.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockFace {
    /// e.g. `Sunday, October 18, 2026`
    pub date: String,
    /// e.g. `09:05 AM`
    pub time: String,
}

impl ClockFace {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            date: now.format("%A, %B %-d, %Y").to_string(),
            time: now.format("%I:%M %p").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_long_date_and_twelve_hour_time() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(21, 5, 42)
            .unwrap();
        let face = ClockFace::at(now);
        assert_eq!(face.date, "Sunday, October 18, 2026");
        assert_eq!(face.time, "09:05 PM");
    }

    #[test]
    fn midnight_is_twelve_am() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let face = ClockFace::at(now);
        assert_eq!(face.date, "Sunday, January 4, 2026");
        assert_eq!(face.time, "12:00 AM");
    }
}
