//! The export hand-off.
//!
//! `ts-sim` only defines the boundary.  File formats live in `ts-output`,
//! which implements [`LogExporter`] for its CSV and JSON writers.

use std::fmt;
use std::path::PathBuf;

use ts_vehicle::Record;

/// Boxed error returned by exporters.
pub type ExportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A file an exporter wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Human-readable format name, e.g. `"CSV"`.
    pub format: &'static str,
    pub path:   PathBuf,
}

impl fmt::Display for ExportedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.format, self.path.display())
    }
}

/// Receives the finished log at the end of every `simulate` call.
///
/// Called with the *whole* cumulative log, never an empty one (the system
/// skips export with a warning instead).  Implementations overwrite their
/// destination on every call.
pub trait LogExporter {
    fn export(&mut self, records: &[Record]) -> Result<Vec<ExportedFile>, ExportError>;
}
