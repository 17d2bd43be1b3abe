//! Combined CSV + JSON exporter.

use std::path::PathBuf;

use ts_sim::{ExportError, ExportedFile, LogExporter};
use ts_vehicle::Record;

use crate::{CsvExporter, JsonExporter, OutputResult};

pub const DEFAULT_CSV_PATH:  &str = "data_log.csv";
pub const DEFAULT_JSON_PATH: &str = "data_log.json";

/// Writes the CSV file, then the JSON file.
///
/// If the CSV write fails the JSON file is left untouched.
#[derive(Debug, Clone)]
pub struct FileExporter {
    csv:  CsvExporter,
    json: JsonExporter,
}

impl FileExporter {
    pub fn new(csv_path: impl Into<PathBuf>, json_path: impl Into<PathBuf>) -> Self {
        Self {
            csv:  CsvExporter::new(csv_path),
            json: JsonExporter::new(json_path),
        }
    }

    pub fn csv(&self) -> &CsvExporter {
        &self.csv
    }

    pub fn json(&self) -> &JsonExporter {
        &self.json
    }

    pub fn write(&self, records: &[Record]) -> OutputResult<Vec<ExportedFile>> {
        self.csv.write(records)?;
        self.json.write(records)?;
        Ok(vec![
            ExportedFile { format: "CSV",  path: self.csv.path().to_path_buf() },
            ExportedFile { format: "JSON", path: self.json.path().to_path_buf() },
        ])
    }
}

impl Default for FileExporter {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_PATH, DEFAULT_JSON_PATH)
    }
}

impl LogExporter for FileExporter {
    fn export(&mut self, records: &[Record]) -> Result<Vec<ExportedFile>, ExportError> {
        Ok(self.write(records)?)
    }
}
