//! `DD-MM-YYYY` exam dates.
//!
//! The feed and the configuration both carry dates as day-month-year with a
//! 1-indexed month. chrono months are 1-indexed too, so the month is passed
//! through unchanged; the resulting instant is local midnight of that day.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

/// Parse a `DD-MM-YYYY` string into local midnight of that day.
///
/// Empty or absent input yields `Ok(None)`, not an error.
pub fn parse_date(input: Option<&str>) -> Result<Option<NaiveDateTime>, ValidationError> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let format_err = || ValidationError::DateFormat {
        input: raw.to_string(),
    };

    let mut parts = raw.split('-');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format_err());
    };

    let day: u32 = day.trim().parse().map_err(|_| format_err())?;
    let month: u32 = month.trim().parse().map_err(|_| format_err())?;
    let year: i32 = year.trim().parse().map_err(|_| format_err())?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ValidationError::CalendarDate { day, month, year })?;
    Ok(date.and_hms_opt(0, 0, 0))
}

/// Render an instant's calendar day as `DD-MM-YYYY`.
pub fn format_date(instant: &NaiveDateTime) -> String {
    instant.format("%d-%m-%Y").to_string()
}
