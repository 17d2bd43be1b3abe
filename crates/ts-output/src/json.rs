//! JSON output backend.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ts_sim::{ExportError, ExportedFile, LogExporter};
use ts_vehicle::Record;

use crate::{OutputError, OutputResult};

/// Writes the log as a pretty-printed JSON array of record objects.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create (or truncate) the file and write the whole array.
    pub fn write(&self, records: &[Record]) -> OutputResult<()> {
        if records.is_empty() {
            return Err(OutputError::EmptyLog);
        }
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, records)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl LogExporter for JsonExporter {
    fn export(&mut self, records: &[Record]) -> Result<Vec<ExportedFile>, ExportError> {
        self.write(records)?;
        Ok(vec![ExportedFile { format: "JSON", path: self.path.clone() }])
    }
}

/// Read a file written by [`JsonExporter`] back into records.
pub fn read_json(path: impl AsRef<Path>) -> OutputResult<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
