//! Core domain types for the syllabus parser.
//!
//! This module defines the values that cross the extraction boundary:
//! - Dated (or undated) course events
//! - Weighted evaluation components
//! - The parse result bundling both with a summary

use crate::date::parse_iso_date;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

// ============================================================================
// Events
// ============================================================================

/// A titled course event, optionally carrying an ISO `YYYY-MM-DD` date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventItem {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl EventItem {
    pub fn new(title: impl Into<String>, date: Option<&str>) -> Self {
        Self {
            title: title.into(),
            date: date.map(str::to_string),
        }
    }

    /// The raw date string, or None when absent or blank
    pub fn raw_date(&self) -> Option<&str> {
        self.date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// The parsed calendar date, or None when undated or malformed
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.raw_date().and_then(parse_iso_date)
    }
}

// ============================================================================
// Evaluations
// ============================================================================

/// One graded component (e.g. "Midterm") and its percentage weight
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EvaluationItem {
    pub name: String,
    pub weight: f64,
}

impl EvaluationItem {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

// ============================================================================
// Parse Result
// ============================================================================

/// Everything the extraction step produced for one uploaded document
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ParseResult {
    pub summary: String,
    #[serde(default)]
    pub events: Vec<EventItem>,
    #[serde(default)]
    pub evaluations: Vec<EvaluationItem>,
}

impl ParseResult {
    /// Parse a result from its JSON wire form
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load a result from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read(path)?;
        let result = Self::from_json(&contents)?;
        tracing::debug!(
            "Loaded parse result from {:?}: {} events, {} evaluations",
            path,
            result.events.len(),
            result.evaluations.len()
        );
        Ok(result)
    }

    /// Save a result as pretty JSON, replacing the target atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        let contents = serde_json::to_string_pretty(self)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved parse result to {:?}", path);
        Ok(())
    }

    /// Events that carry a usable calendar date, in input order
    pub fn dated_events(&self) -> impl Iterator<Item = (&EventItem, NaiveDate)> {
        self.events
            .iter()
            .filter_map(|e| e.calendar_date().map(|d| (e, d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "summary": "Intro to Databases",
            "events": [
                { "title": "Midterm", "date": "2025-10-01" },
                { "title": "Project kickoff", "date": null },
                { "title": "Reading week" }
            ],
            "evaluations": [
                { "name": "Midterm", "weight": 30 },
                { "name": "Final", "weight": 70.0 }
            ]
        }"#;

        let result = ParseResult::from_json(json.as_bytes()).unwrap();
        assert_eq!(result.summary, "Intro to Databases");
        assert_eq!(result.events.len(), 3);
        assert_eq!(result.events[0].date.as_deref(), Some("2025-10-01"));
        assert!(result.events[1].date.is_none());
        assert!(result.events[2].date.is_none());
        assert_eq!(result.evaluations[0].weight, 30.0);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let result = ParseResult::from_json(br#"{ "summary": "Only a summary" }"#).unwrap();
        assert!(result.events.is_empty());
        assert!(result.evaluations.is_empty());
    }

    #[test]
    fn test_blank_date_is_undated() {
        let event = EventItem::new("Quiz", Some("   "));
        assert_eq!(event.raw_date(), None);
        assert_eq!(event.calendar_date(), None);
    }

    #[test]
    fn test_dated_events_skips_malformed() {
        let result = ParseResult {
            summary: String::new(),
            events: vec![
                EventItem::new("A", Some("2025-09-23")),
                EventItem::new("B", Some("2025-02-30")),
                EventItem::new("C", None),
                EventItem::new("D", Some("2025-12-31")),
            ],
            evaluations: vec![],
        };

        let titles: Vec<_> = result.dated_events().map(|(e, _)| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "D"]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("result.json");

        let result = ParseResult {
            summary: "Algorithms".into(),
            events: vec![EventItem::new("Final exam", Some("2025-12-15"))],
            evaluations: vec![EvaluationItem::new("Final", 100.0)],
        };
        result.save(&path).unwrap();

        let loaded = ParseResult::load(&path).unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn test_load_malformed_json_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(ParseResult::load(&path), Err(Error::Json(_))));
    }
}
