//! CSV output backend.

use std::path::{Path, PathBuf};

use csv::{Reader, Writer};
use ts_sim::{ExportError, ExportedFile, LogExporter};
use ts_vehicle::Record;

use crate::{OutputError, OutputResult};

/// Writes the log as one CSV row per record.
///
/// Columns follow `Record` field order; the header row is written by the
/// serializer from the first record.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create (or truncate) the file and write every record.
    pub fn write(&self, records: &[Record]) -> OutputResult<()> {
        if records.is_empty() {
            return Err(OutputError::EmptyLog);
        }
        let mut writer = Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl LogExporter for CsvExporter {
    fn export(&mut self, records: &[Record]) -> Result<Vec<ExportedFile>, ExportError> {
        self.write(records)?;
        Ok(vec![ExportedFile { format: "CSV", path: self.path.clone() }])
    }
}

/// Read a file written by [`CsvExporter`] back into records.
pub fn read_csv(path: impl AsRef<Path>) -> OutputResult<Vec<Record>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
