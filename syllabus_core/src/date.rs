//! ISO calendar date parsing and human-readable display formatting.
//!
//! Dates are naive calendar dates: nothing here consults a timezone.

use chrono::{Datelike, NaiveDate};

/// Display string used when an event has no date at all
pub const NO_DATE: &str = "No date";

/// Parse a strict `YYYY-MM-DD` string into a calendar date.
///
/// The input must have exactly three dash-separated, all-digit, non-zero
/// components (a 4-digit year, month and day of at most 2 digits) that name
/// a real day (per-month lengths and leap years apply).
/// Anything else yields `None`.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.trim().split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if year.len() != 4 || month.len() > 2 || day.len() > 2 {
        return None;
    }

    let year: i32 = numeric_component(year)?.try_into().ok()?;
    let month: u32 = numeric_component(month)?.try_into().ok()?;
    let day: u32 = numeric_component(day)?.try_into().ok()?;

    if year == 0 || month == 0 || day == 0 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

fn numeric_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    }
}

/// Render a date as e.g. `September 23rd, 2025`
pub fn display_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// Format an optional ISO date for display.
///
/// Absent (or blank) dates become [`NO_DATE`]; present but malformed
/// strings are returned unchanged.
pub fn format_display_date(input: Option<&str>) -> String {
    match input {
        None => NO_DATE.to_string(),
        Some(raw) if raw.trim().is_empty() => NO_DATE.to_string(),
        Some(raw) => match parse_iso_date(raw) {
            Some(date) => display_date(date),
            None => raw.to_string(),
        },
    }
}
