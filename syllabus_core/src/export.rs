//! Export artifacts and the capability that hands them to the platform.
//!
//! Codecs only produce bytes plus a suggested file name and MIME type.
//! Delivering them (a browser download, a file on disk) is the job of a
//! [`DownloadSink`].

use crate::clock::Clock;
use crate::{csv_export, ics, Error, EventItem, Result};
use fs2::FileExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Supported export formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Ics,
    Csv,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Ics => "text/calendar",
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Ics => "syllabus-events.ics",
            ExportFormat::Csv => "syllabus-events.csv",
        }
    }
}

/// Per-export settings
#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    /// Calendar display name (ICS only)
    pub calendar_name: Option<String>,
}

/// Built file content ready to be saved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

/// Build the artifact for `events` in the requested format.
///
/// Returns `Ok(None)` when there are no events at all: an empty export
/// produces no file.
pub fn build_export(
    events: &[EventItem],
    format: ExportFormat,
    options: &ExportOptions,
    clock: &dyn Clock,
) -> Result<Option<ExportArtifact>> {
    if events.is_empty() {
        tracing::info!("No events to export");
        return Ok(None);
    }

    let content = match format {
        ExportFormat::Ics => ics::build_ics(events, options.calendar_name.as_deref(), clock),
        ExportFormat::Csv => csv_export::build_csv(events)?,
    };

    Ok(Some(ExportArtifact {
        bytes: content.into_bytes(),
        file_name: format.file_name(),
        mime_type: format.mime_type(),
    }))
}

/// Platform capability for delivering an exported file
pub trait DownloadSink {
    /// Save `bytes` under `file_name`; returns where it ended up
    fn save(&mut self, bytes: &[u8], file_name: &str, mime_type: &str) -> Result<PathBuf>;
}

/// Deliver an artifact through a sink
pub fn deliver(sink: &mut dyn DownloadSink, artifact: &ExportArtifact) -> Result<PathBuf> {
    sink.save(&artifact.bytes, artifact.file_name, artifact.mime_type)
}

/// Saves exports as files inside a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir` (created on first save)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, bytes: &[u8], file_name: &str, mime_type: &str) -> Result<PathBuf> {
        // Only a bare file name may be used; no separators or parent refs.
        let name = Path::new(file_name);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(Error::Export(format!("Invalid file name: {:?}", file_name)));
        }

        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(name);

        // The temp file is removed on drop if anything below fails.
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(bytes)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&target).map_err(|e| Error::Io(e.error))?;

        tracing::info!(
            "Saved {} ({} bytes, {}) to {:?}",
            file_name,
            bytes.len(),
            mime_type,
            target
        );
        Ok(target)
    }
}
