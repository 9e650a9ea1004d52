//! iCalendar (RFC 5545) export of course events.
//!
//! Every dated event becomes an all-day `VEVENT` with an exclusive end date.
//! Undated or malformed events are skipped. Output is CRLF-terminated.

use crate::clock::Clock;
use crate::EventItem;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt::Write;

/// Product identifier written into every calendar
pub const PRODUCT_ID: &str = "-//Syllabus Parser//Syllabus Events//EN";

/// Calendar name used when the caller does not supply one
pub const DEFAULT_CALENDAR_NAME: &str = "Syllabus Events";

/// Domain tag appended to every generated UID
pub const UID_SUFFIX: &str = "@syllabus-parser";

const CRLF: &str = "\r\n";

/// Escape free text for an iCalendar TEXT value.
///
/// Backslashes go first so later replacements are not escaped twice.
/// CRLF, CR and LF each become a literal `\n`.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Deterministic per-export UID built from title, date and position
pub fn event_uid(title: &str, date: &str, index: usize) -> String {
    let mut uid: String = format!("{}{}{}", title, date, index)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    uid.push_str(UID_SUFFIX);
    uid
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn format_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build a complete calendar document.
///
/// The clock is read once so every `DTSTAMP` in the document matches.
pub fn build_ics(events: &[EventItem], calendar_name: Option<&str>, clock: &dyn Clock) -> String {
    let stamp = format_stamp(clock.now());
    let name = calendar_name.unwrap_or(DEFAULT_CALENDAR_NAME);

    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{}", PRODUCT_ID));
    push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(name)));

    let mut written = 0;
    for (index, event) in events.iter().enumerate() {
        let (raw, date) = match event.raw_date().zip(event.calendar_date()) {
            Some(pair) => pair,
            None => {
                tracing::debug!("Skipping event #{} {:?}: no usable date", index, event.title);
                continue;
            }
        };
        // DATE values are 4-digit years; 9999-12-31 has no end date to write.
        let Some(end) = date.succ_opt().filter(|d| d.year() <= 9999) else {
            tracing::debug!("Skipping event #{} {:?}: date out of range", index, event.title);
            continue;
        };

        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("UID:{}", event_uid(&event.title, raw, index)));
        push_line(&mut out, &format!("DTSTAMP:{}", stamp));
        push_line(&mut out, &format!("DTSTART;VALUE=DATE:{}", format_date(date)));
        push_line(&mut out, &format!("DTEND;VALUE=DATE:{}", format_date(end)));
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(&event.title)));
        push_line(&mut out, "END:VEVENT");
        written += 1;
    }

    push_line(&mut out, "END:VCALENDAR");

    tracing::debug!(
        "Built calendar with {} of {} events",
        written,
        events.len()
    );
    out
}

fn push_line(out: &mut String, line: &str) {
    let _ = write!(out, "{}{}", line, CRLF);
}
