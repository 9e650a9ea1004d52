//! Error types for the syllabus_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for syllabus_core operations
///
/// The codecs themselves are total and never produce one of these; only the
/// I/O boundaries (result loading, config, download sinks) do.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Saving an export artifact failed
    #[error("Export error: {0}")]
    Export(String),

    /// The extraction collaborator returned something unusable
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
