//! Plain-text rendering of a parse result.

use crate::date::format_display_date;
use crate::weights::{EvaluationReport, TARGET_TOTAL};
use crate::ParseResult;
use std::fmt::Write;

/// Format a weight with at most two decimals and no trailing zeros
pub fn format_weight(weight: f64) -> String {
    let fixed = format!("{:.2}", weight);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render summary, events and evaluations as a text report
pub fn render_report(result: &ParseResult, evaluations: &EvaluationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Summary");
    if result.summary.trim().is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        for line in result.summary.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Events ({})", result.events.len());
    if result.events.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for event in &result.events {
        let _ = writeln!(
            out,
            "  {} - {}",
            format_display_date(event.date.as_deref()),
            event.title
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Evaluations ({})", evaluations.items.len());
    if evaluations.items.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }
    for item in &evaluations.items {
        let _ = writeln!(out, "  {}: {}%", item.name, format_weight(item.weight));
    }
    let _ = writeln!(out, "  Total: {}%", format_weight(evaluations.total));
    if !evaluations.within_tolerance {
        let _ = writeln!(
            out,
            "  ! Weights do not add up to {}%",
            format_weight(TARGET_TOTAL)
        );
    }

    out
}
