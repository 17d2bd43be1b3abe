//! The `TrafficSystem` struct and its tick loop.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ts_core::{Level, LogSink, TracingSink, VehicleId, VehicleRng, VehicleSlot};
use ts_vehicle::{Record, TickOutcome, Transponder, Vehicle};

use crate::{
    AnalysisReport, LogExporter, Pacing, SimError, SimResult, SystemConfig,
};

/// Lifecycle of a [`TrafficSystem`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, or between `simulate` calls.
    Idle,
    /// Inside the tick loop of `simulate`.
    Running,
}

/// What one `simulate` call did.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Ticks executed.
    pub steps:             u64,
    /// Records appended to the log by this call.
    pub records_appended:  usize,
    /// Modifier errors recovered during this call, summed over vehicles.
    pub behavior_failures: usize,
    /// `steps * dt`.
    pub simulated_secs:    f64,
    /// `true` if the exporter ran and succeeded.
    pub exported:          bool,
}

// ── TrafficSystem ─────────────────────────────────────────────────────────────

/// Owns the fleet and the record log, and drives the tick loop.
///
/// Vehicle *i* is always paired with RNG *i* and transponder *i*; all three
/// are indexed by the [`VehicleSlot`] returned from
/// [`add_vehicle`][Self::add_vehicle].  Transponders hold no state, so they
/// are materialised on demand from the vehicle list rather than stored.
///
/// Create via [`TrafficSystemBuilder`][crate::TrafficSystemBuilder] or
/// [`TrafficSystem::new`].
pub struct TrafficSystem {
    config:   SystemConfig,
    vehicles: Vec<Vehicle>,
    /// Per-vehicle RNGs, index-aligned with `vehicles`.
    rngs:     Vec<VehicleRng>,
    ids:      HashSet<VehicleId>,
    /// Append-only; cleared only by constructing a new system.
    log:      Vec<Record>,
    sink:     Arc<dyn LogSink>,
    exporter: Option<Box<dyn LogExporter>>,
    state:    RunState,
}

impl TrafficSystem {
    /// An empty system that logs through `tracing` and never exports.
    pub fn new(config: SystemConfig) -> Self {
        Self::with_parts(config, Arc::new(TracingSink), None)
    }

    pub(crate) fn with_parts(
        config:   SystemConfig,
        sink:     Arc<dyn LogSink>,
        exporter: Option<Box<dyn LogExporter>>,
    ) -> Self {
        Self {
            config,
            vehicles: Vec::new(),
            rngs:     Vec::new(),
            ids:      HashSet::new(),
            log:      Vec::new(),
            sink,
            exporter,
            state:    RunState::Idle,
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `vehicle` and bind a transponder to it.
    ///
    /// Its RNG is seeded from the system seed and the returned slot.  Ids
    /// must be unique within the system.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> SimResult<VehicleSlot> {
        if self.ids.contains(vehicle.id()) {
            return Err(SimError::DuplicateVehicle(vehicle.id().clone()));
        }
        let slot = VehicleSlot::try_from(self.vehicles.len())
            .map_err(|_| SimError::Config("vehicle count exceeds u32::MAX".into()))?;

        self.ids.insert(vehicle.id().clone());
        self.rngs.push(VehicleRng::new(self.config.seed, slot));
        self.vehicles.push(vehicle);
        Ok(slot)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The cumulative record log, in append order.
    pub fn log(&self) -> &[Record] {
        &self.log
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, slot: VehicleSlot) -> Option<&Vehicle> {
        self.vehicles.get(slot.index())
    }

    /// Number of registered vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// One transponder per vehicle, in registration order.
    pub fn transponders(&self) -> impl ExactSizeIterator<Item = Transponder<'_>> + '_ {
        self.vehicles.iter().map(Transponder::attach)
    }

    pub fn transponder(&self, slot: VehicleSlot) -> Option<Transponder<'_>> {
        self.vehicles.get(slot.index()).map(Transponder::attach)
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every vehicle by `dt` and append one record per vehicle,
    /// stamped with `sim_time`.
    ///
    /// Returns the number of vehicles whose modifier failed this tick.
    pub fn tick(&mut self, dt: f64, sim_time: f64) -> usize {
        let sink = self.sink.as_ref();
        let trace_records = sink.enabled(Level::Debug);
        let mut failures = 0;

        for (vehicle, rng) in self.vehicles.iter_mut().zip(self.rngs.iter_mut()) {
            if vehicle.update(dt, sim_time, rng, sink) == TickOutcome::BehaviorFailed {
                failures += 1;
            }
            let record = Transponder::attach(vehicle).snapshot().stamp(sim_time);
            if trace_records {
                sink.emit(Level::Debug, &format!("Record: {record:?}"));
            }
            self.log.push(record);
        }
        failures
    }

    /// Run `floor(duration / dt)` ticks from `sim_time = 0`, then export.
    ///
    /// The step count follows the configured
    /// [`DurationPolicy`][crate::DurationPolicy].  Records are appended even
    /// if the export that follows fails.
    pub fn simulate(
        &mut self,
        duration_secs: f64,
        dt_secs:       f64,
        pacing:        Pacing,
    ) -> SimResult<RunSummary> {
        let plan = self.config.duration_policy.plan(duration_secs, dt_secs)?;
        let pause = match pacing {
            Pacing::Batch    => None,
            Pacing::Realtime => Some(Duration::try_from_secs_f64(dt_secs).map_err(|e| {
                SimError::Config(format!("cannot pace ticks of {dt_secs}s: {e}"))
            })?),
        };

        let remainder = plan.remainder_secs();
        if remainder > 0.0 {
            self.sink.emit(
                Level::Warn,
                &format!(
                    "duration {duration_secs}s is not a multiple of dt {dt_secs}s; \
                     simulating {}s and dropping the last {remainder}s",
                    plan.simulated_secs()
                ),
            );
        }

        self.sink.emit(
            Level::Info,
            &format!(
                "Starting simulation: duration={duration_secs}s, dt={dt_secs}s, realtime={}",
                pacing.is_realtime()
            ),
        );

        self.state = RunState::Running;
        let before = self.log.len();
        let mut behavior_failures = 0;
        let mut clock = plan.make_clock();

        for _ in 0..plan.steps {
            behavior_failures += self.tick(dt_secs, clock.sim_time);
            if let Some(pause) = pause {
                std::thread::sleep(pause);
            }
            clock.advance();
        }
        self.state = RunState::Idle;

        let records_appended = self.log.len() - before;
        self.sink.emit(
            Level::Info,
            &format!(
                "Simulation complete: {} ticks, {records_appended} records.",
                plan.steps
            ),
        );

        let exported = self.export_log()?;

        Ok(RunSummary {
            steps: plan.steps,
            records_appended,
            behavior_failures,
            simulated_secs: plan.simulated_secs(),
            exported,
        })
    }

    // ── Export ────────────────────────────────────────────────────────────

    /// Hand the whole log to the configured exporter.
    ///
    /// Returns `Ok(false)` without touching any file when no exporter is
    /// configured or the log is empty (the latter with a warning).
    pub fn export_log(&mut self) -> SimResult<bool> {
        let Some(exporter) = self.exporter.as_mut() else {
            return Ok(false);
        };
        if self.log.is_empty() {
            self.sink.emit(Level::Warn, "No data to export.");
            return Ok(false);
        }

        match exporter.export(&self.log) {
            Ok(files) => {
                for file in &files {
                    self.sink.emit(Level::Info, &format!("Data log written to {file}"));
                }
                Ok(true)
            }
            Err(e) => {
                self.sink.emit(Level::Error, &format!("Export failed: {e}"));
                Err(SimError::Export(e))
            }
        }
    }

    // ── Analysis ──────────────────────────────────────────────────────────

    /// Call `callback` once per record, in log order.
    ///
    /// An `Err` from the callback is logged at error level and the scan moves
    /// on to the next record.
    pub fn analyze<F, E>(&self, mut callback: F) -> AnalysisReport
    where
        F: FnMut(&Record) -> Result<(), E>,
        E: fmt::Display,
    {
        let mut report = AnalysisReport::default();
        for (i, record) in self.log.iter().enumerate() {
            report.visited += 1;
            if let Err(e) = callback(record) {
                report.failed += 1;
                self.sink.emit(
                    Level::Error,
                    &format!(
                        "Analysis callback error at record {i} ({}, t={}s): {e}",
                        record.vehicle_id, record.sim_time
                    ),
                );
            }
        }
        report
    }
}

impl fmt::Debug for TrafficSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrafficSystem")
            .field("config", &self.config)
            .field("vehicles", &self.vehicles)
            .field("log_len", &self.log.len())
            .field("exporter", &self.exporter.is_some())
            .field("state", &self.state)
            .finish()
    }
}
