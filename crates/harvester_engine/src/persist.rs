use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::schema::PostRecord;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Destination for newly inserted records, one call per batch.
pub trait RecordSink {
    fn append(&mut self, records: &[PostRecord]) -> Result<(), PersistError>;
}

/// Appends records to a CSV file. The header is written only when this sink
/// creates the file, so a file left by an interrupted run stays valid.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
    /// Set once the output directory has passed [`ensure_output_dir`].
    dir_ready: bool,
}

impl CsvFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            dir_ready: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvFileSink {
    fn append(&mut self, records: &[PostRecord]) -> Result<(), PersistError> {
        // An empty file would make every later append skip the header.
        if records.is_empty() {
            return Ok(());
        }
        if !self.dir_ready {
            if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
                ensure_output_dir(dir)?;
            }
            self.dir_ready = true;
        }

        let is_new_file = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new_file)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        engine_info!("Wrote {} posts to {}", records.len(), self.path.display());
        Ok(())
    }
}
