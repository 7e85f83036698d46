//! Remaining-time breakdown between two instants.
//!
//! The calculation is a pure function of `target` and `now`; callers pass
//! wall-clock "now" on every tick so sleep/resume and clock adjustments
//! correct themselves on the next recomputation.
//!
//! ## Month approximation
//!
//! A "month" is exactly 30 days (2,592,000,000 ms). This is a known
//! approximation, not a calendar-aware month: a countdown spanning
//! 31 January to 2 March reads `1 month 1 day`, not `1 month 2 days`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const SECOND_MS: i64 = 1000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
/// Thirty days. See the module docs.
pub const MONTH_MS: i64 = 30 * DAY_MS;

/// Structured remaining time.
///
/// When `total_millis <= 0` the result is the terminal "arrived" state and
/// every component is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResult {
    pub total_millis: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

impl CountdownResult {
    /// The zeroed terminal result, keeping `total_millis` as given.
    pub fn arrived(total_millis: i64, include_seconds: bool) -> Self {
        Self {
            total_millis: total_millis.min(0),
            months: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: include_seconds.then_some(0),
        }
    }

    pub fn is_arrived(&self) -> bool {
        self.total_millis <= 0
    }
}

/// Decompose `target - now` into months/days/hours/minutes[/seconds].
///
/// Every component is a floored division of the running remainder. For a
/// negative total the components are meaningless; use [`remaining`] when
/// the arrived state must be zeroed.
pub fn compute(
    target: NaiveDateTime,
    now: NaiveDateTime,
    include_seconds: bool,
) -> CountdownResult {
    let total = (target - now).num_milliseconds();
    decompose(total, include_seconds)
}

/// Like [`compute`], but folds `total <= 0` into [`CountdownResult::arrived`].
pub fn remaining(
    target: NaiveDateTime,
    now: NaiveDateTime,
    include_seconds: bool,
) -> CountdownResult {
    let result = compute(target, now, include_seconds);
    if result.is_arrived() {
        CountdownResult::arrived(result.total_millis, include_seconds)
    } else {
        result
    }
}

pub(crate) fn decompose(total: i64, include_seconds: bool) -> CountdownResult {
    // div_euclid with a positive divisor is floor division; `%` keeps the
    // dividend's sign, matching the reference arithmetic.
    let months = total.div_euclid(MONTH_MS);
    let days = (total % MONTH_MS).div_euclid(DAY_MS);
    let hours = (total % DAY_MS).div_euclid(HOUR_MS);
    let minutes = (total % HOUR_MS).div_euclid(MINUTE_MS);
    let seconds = include_seconds.then(|| (total % MINUTE_MS).div_euclid(SECOND_MS));

    CountdownResult {
        total_millis: total,
        months,
        days,
        hours,
        minutes,
        seconds,
    }
}

/// Two-digit zero padding for display digits (`7` -> `"07"`).
pub fn format_time(value: i64) -> String {
    if (0..10).contains(&value) {
        format!("0{value}")
    } else {
        value.to_string()
    }
}
