#![forbid(unsafe_code)]

//! Core model and codecs for the syllabus parser.
//!
//! This crate provides:
//! - Domain types (events, evaluations, parse results)
//! - Display formatting for ISO dates
//! - Evaluation weight normalization
//! - Calendar (ICS) and table (CSV) export
//! - Capabilities for time and file delivery

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod clock;
pub mod date;
pub mod weights;
pub mod ics;
pub mod csv_export;
pub mod export;
pub mod extract;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{format_display_date, parse_iso_date};
pub use weights::{normalize_evaluations, normalize_weights, EvaluationReport, Normalizer};
pub use ics::build_ics;
pub use csv_export::build_csv;
pub use export::{
    build_export, deliver, DirectorySink, DownloadSink, ExportArtifact, ExportFormat,
    ExportOptions,
};
pub use extract::{Extractor, JsonResultExtractor};
pub use render::render_report;
