//! `ts-sim` — tick loop orchestrator for the transponder traffic simulator.
//!
//! # Tick loop
//!
//! ```text
//! simulate(duration, dt, pacing):
//!   steps = floor(duration / dt)          (or exact, per DurationPolicy)
//!   sim_time = 0
//!   repeat steps times:
//!     for vehicle in registration order:
//!       ① modifier   — SpeedModifier::apply (errors → warning, keep going)
//!       ② integrate  — position += speed / 3600 * dt
//!       ③ snapshot   — Transponder::snapshot().stamp(sim_time) → log
//!     sleep(dt) if Pacing::Realtime
//!     sim_time += dt
//!   export the whole log if an exporter is configured
//! ```
//!
//! Every `simulate` call restarts `sim_time` at 0 and appends to the same
//! log; the log is only ever cleared by building a new system.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_sim::{Pacing, TrafficSystemBuilder};
//! use ts_vehicle::Vehicle;
//!
//! let mut system = TrafficSystemBuilder::new()
//!     .vehicle(Vehicle::named("Vehicle-1", 30.0)?)
//!     .build()?;
//! system.simulate(5.0, 1.0, Pacing::Batch)?;
//! let report = system.analyze(|r| -> Result<(), String> { Ok(()) });
//! ```

pub mod analysis;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod system;

#[cfg(test)]
mod tests;

pub use analysis::{Alert, AnalysisReport, SpeedAlert};
pub use builder::TrafficSystemBuilder;
pub use config::{DurationPolicy, Pacing, SystemConfig};
pub use error::{SimError, SimResult};
pub use export::{ExportError, ExportedFile, LogExporter};
pub use system::{RunState, RunSummary, TrafficSystem};
