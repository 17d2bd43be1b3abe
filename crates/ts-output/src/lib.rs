//! `ts-output` — record-log exporters for the transponder traffic simulator.
//!
//! | Exporter         | Files created                                  |
//! |------------------|------------------------------------------------|
//! | [`CsvExporter`]  | one CSV file, header `vehicle_id,speed,position,sim_time` |
//! | [`JsonExporter`] | one pretty-printed JSON array of record objects |
//! | [`FileExporter`] | both (CSV first, then JSON)                    |
//!
//! All three implement `ts_sim::LogExporter` and overwrite their files on
//! every export.  Exporting an empty slice is refused with
//! [`OutputError::EmptyLog`] before any file is opened.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::FileExporter;
//!
//! let mut system = TrafficSystemBuilder::new()
//!     .exporter(FileExporter::default())
//!     .build()?;
//! system.simulate(5.0, 1.0, Pacing::Batch)?;
//! let back = ts_output::read_csv("data_log.csv")?;
//! ```

pub mod csv;
pub mod error;
pub mod file;
pub mod json;


pub use crate::csv::{CsvExporter, read_csv};
pub use error::{OutputError, OutputResult};
pub use file::{DEFAULT_CSV_PATH, DEFAULT_JSON_PATH, FileExporter};
pub use json::{JsonExporter, read_json};
