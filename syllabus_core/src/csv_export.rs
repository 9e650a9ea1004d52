//! CSV export of course events for spreadsheet and calendar import tools.
//!
//! Unlike the calendar export, every event gets a row. Undated or malformed
//! dates leave the `Date` column empty.

use crate::{Error, EventItem, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Header row written at the top of every table
pub const HEADER: [&str; 2] = ["Title", "Date"];

/// Build the two-column `Title,Date` table.
///
/// Every field is quoted and embedded quotes are doubled. Rows end in `\n`.
/// Errors can only come from the writer itself, never from event content.
pub fn build_csv(events: &[EventItem]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for event in events {
        let date = event
            .calendar_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        writer.write_record([event.title.as_str(), date.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(format!("Failed to flush CSV: {}", e)))?;
    let table = String::from_utf8(bytes)
        .map_err(|e| Error::Export(format!("CSV output is not UTF-8: {}", e)))?;

    tracing::debug!("Built CSV with {} rows", events.len());
    Ok(table)
}
