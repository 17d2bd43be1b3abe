//! Fluent builder for constructing a [`TrafficSystem`].

use std::sync::Arc;

use ts_core::{LogSink, TracingSink};
use ts_vehicle::Vehicle;

use crate::{LogExporter, SimResult, SystemConfig, TrafficSystem};

/// Fluent builder for [`TrafficSystem`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                        |
/// |------------------|--------------------------------|
/// | `.config(c)`     | `SystemConfig::default()`      |
/// | `.log_sink(s)`   | `TracingSink`                  |
/// | `.exporter(e)`   | none; `simulate` never writes |
/// | `.vehicle(v)`    | empty fleet                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut system = TrafficSystemBuilder::new()
///     .config(SystemConfig { seed: 7, ..Default::default() })
///     .exporter(FileExporter::new("data_log.csv", "data_log.json"))
///     .vehicle(Vehicle::named("Vehicle-1", 42.0)?.with_behavior(RandomSlowdown::default()))
///     .build()?;
/// ```
pub struct TrafficSystemBuilder {
    config:   SystemConfig,
    sink:     Option<Arc<dyn LogSink>>,
    exporter: Option<Box<dyn LogExporter>>,
    vehicles: Vec<Vehicle>,
}

impl TrafficSystemBuilder {
    pub fn new() -> Self {
        Self {
            config:   SystemConfig::default(),
            sink:     None,
            exporter: None,
            vehicles: Vec::new(),
        }
    }

    pub fn config(mut self, config: SystemConfig) -> Self {
        self.config = config;
        self
    }

    /// Where run milestones, warnings, and per-record debug lines go.
    pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Enable export at the end of every `simulate` call.
    pub fn exporter<E: LogExporter + 'static>(mut self, exporter: E) -> Self {
        self.exporter = Some(Box::new(exporter));
        self
    }

    /// Queue a vehicle for registration, in call order.
    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn vehicles(mut self, vehicles: impl IntoIterator<Item = Vehicle>) -> Self {
        self.vehicles.extend(vehicles);
        self
    }

    /// Build the system and register the queued vehicles.
    ///
    /// Fails on the first duplicate vehicle id.
    pub fn build(self) -> SimResult<TrafficSystem> {
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));
        let mut system = TrafficSystem::with_parts(self.config, sink, self.exporter);
        for vehicle in self.vehicles {
            system.add_vehicle(vehicle)?;
        }
        Ok(system)
    }
}

impl Default for TrafficSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
