//! `ts-core` — foundational types for the transponder traffic simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`ids`]   | `VehicleId` (string identity), `VehicleSlot` (registration index) |
//! | [`time`]  | `Tick`, `StepPlan`, `SimClock`                              |
//! | [`rng`]   | `VehicleRng` (per-vehicle), `SimRng` (scenario-level)       |
//! | [`log`]   | `LogSink` trait, `Level`, `TracingSink`, `MemorySink`, `NullSink` |
//! | [`error`] | `TsError`, `TsResult`                                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and clock types.     |
//!           | Required by `ts-vehicle` for record export.                |

pub mod error;
pub mod ids;
pub mod log;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TsError, TsResult};
pub use ids::{VehicleId, VehicleSlot};
pub use log::{Level, LogLine, LogSink, MemorySink, NullSink, TracingSink};
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, StepPlan, Tick};
