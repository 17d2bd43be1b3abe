//! Integration tests for ts-sim.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use ts_behavior::{BehaviorError, RandomSlowdown, from_fn};
use ts_core::{Level, MemorySink, TsError, VehicleSlot};
use ts_vehicle::{Record, Vehicle};

use crate::{
    DurationPolicy, ExportError, ExportedFile, LogExporter, Pacing, RunState, SimError,
    SpeedAlert, SystemConfig, TrafficSystem, TrafficSystemBuilder,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Exporter that remembers every log it was handed.
#[derive(Clone, Default)]
struct RecordingExporter {
    calls: Rc<RefCell<Vec<Vec<Record>>>>,
}

impl LogExporter for RecordingExporter {
    fn export(&mut self, records: &[Record]) -> Result<Vec<ExportedFile>, ExportError> {
        self.calls.borrow_mut().push(records.to_vec());
        Ok(vec![ExportedFile { format: "MEM", path: "memory".into() }])
    }
}

/// Exporter that always fails.
struct BrokenExporter;

impl LogExporter for BrokenExporter {
    fn export(&mut self, _records: &[Record]) -> Result<Vec<ExportedFile>, ExportError> {
        Err("disk full".into())
    }
}

fn vehicle(id: &str, speed: f64) -> Vehicle {
    Vehicle::named(id, speed).unwrap()
}

fn three_cars() -> Vec<Vehicle> {
    vec![vehicle("Vehicle-1", 30.0), vehicle("Vehicle-2", 40.0), vehicle("Vehicle-3", 50.0)]
}

fn system_with(vehicles: Vec<Vehicle>, sink: &Arc<MemorySink>) -> TrafficSystem {
    TrafficSystemBuilder::new()
        .log_sink(sink.clone())
        .vehicles(vehicles)
        .build()
        .unwrap()
}

// ── Builder / registration ────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let system = TrafficSystemBuilder::new().build().unwrap();
        assert!(system.is_empty());
        assert!(system.log().is_empty());
        assert_eq!(system.state(), RunState::Idle);
        assert_eq!(system.config().duration_policy, DurationPolicy::Truncate);
    }

    #[test]
    fn slots_follow_registration_order() {
        let mut system = TrafficSystem::new(SystemConfig::default());
        assert_eq!(system.add_vehicle(vehicle("a", 1.0)).unwrap(), VehicleSlot(0));
        assert_eq!(system.add_vehicle(vehicle("b", 2.0)).unwrap(), VehicleSlot(1));
        assert_eq!(system.vehicle(VehicleSlot(1)).unwrap().id().as_str(), "b");
        assert!(system.vehicle(VehicleSlot(2)).is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = TrafficSystemBuilder::new()
            .vehicle(vehicle("dup", 10.0))
            .vehicle(vehicle("dup", 20.0))
            .build();
        assert!(matches!(result, Err(SimError::DuplicateVehicle(id)) if id.as_str() == "dup"));
    }

    #[test]
    fn one_transponder_per_vehicle() {
        let sink = Arc::new(MemorySink::new());
        let system = system_with(three_cars(), &sink);
        assert_eq!(system.transponders().len(), system.len());
        for (t, v) in system.transponders().zip(system.vehicles()) {
            assert_eq!(t.vehicle().id(), v.id());
        }
        let t = system.transponder(VehicleSlot(2)).unwrap();
        assert_eq!(t.snapshot().vehicle_id.as_str(), "Vehicle-3");
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn log_length_is_steps_times_vehicles() {
        for (duration, dt, steps) in [(5.0, 1.0, 5u64), (10.0, 2.5, 4), (7.0, 2.0, 3), (0.3, 0.1, 2)] {
            let sink = Arc::new(MemorySink::new());
            let mut system = system_with(three_cars(), &sink);
            let summary = system.simulate(duration, dt, Pacing::Batch).unwrap();
            assert_eq!(summary.steps, steps, "duration={duration} dt={dt}");
            assert_eq!(system.log().len(), steps as usize * 3);
            assert_eq!(summary.records_appended, steps as usize * 3);
        }
    }

    #[test]
    fn three_vehicle_scenario() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(three_cars(), &sink);
        system.simulate(2.0, 1.0, Pacing::Batch).unwrap();

        let log = system.log();
        assert_eq!(log.len(), 6);

        let ids: Vec<&str> = log.iter().map(|r| r.vehicle_id.as_str()).collect();
        assert_eq!(ids, ["Vehicle-1", "Vehicle-2", "Vehicle-3", "Vehicle-1", "Vehicle-2", "Vehicle-3"]);

        // Last tick is stamped (steps - 1) * dt, not duration.
        let times: Vec<f64> = log.iter().map(|r| r.sim_time).collect();
        assert_eq!(times, [0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        assert_eq!(log[0].position, 0.008);
        assert_eq!(log[3].position, 0.017);
        assert_eq!(log[0].speed, 30.0);
        assert_eq!(log[5].speed, 50.0);
    }

    #[test]
    fn single_tick_integration_is_exact() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(vec![vehicle("car", 90.0)], &sink);
        system.tick(4.0, 0.0);
        let expected = (90.0 / 3600.0) * 4.0;
        assert!((system.vehicles()[0].position_km() - expected).abs() < 1e-12);
        assert_eq!(system.log()[0].position, 0.1);
    }

    #[test]
    fn empty_fleet_runs_and_skips_export() {
        let sink = Arc::new(MemorySink::new());
        let exporter = RecordingExporter::default();
        let mut system = TrafficSystemBuilder::new()
            .log_sink(sink.clone())
            .exporter(exporter.clone())
            .build()
            .unwrap();

        let summary = system.simulate(5.0, 1.0, Pacing::Batch).unwrap();
        assert_eq!(summary.steps, 5);
        assert!(system.log().is_empty());
        assert!(!summary.exported);
        assert!(exporter.calls.borrow().is_empty());
        assert!(sink.contains(Level::Warn, "No data to export"));
    }

    #[test]
    fn failing_behavior_is_isolated() {
        let sink = Arc::new(MemorySink::new());
        let broken = vehicle("A", 60.0).with_behavior(from_fn(|_v, _dt, _t, _rng| {
            Err(BehaviorError::Failed("always".into()))
        }));
        let mut system = system_with(vec![broken, vehicle("B", 30.0)], &sink);

        let summary = system.simulate(3.0, 1.0, Pacing::Batch).unwrap();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.behavior_failures, 3);
        assert_eq!(sink.count(Level::Warn), 3);

        let b_records = system.log().iter().filter(|r| r.vehicle_id.as_str() == "B").count();
        let a_records = system.log().iter().filter(|r| r.vehicle_id.as_str() == "A").count();
        assert_eq!(b_records, 3);
        // A keeps moving at its last known speed.
        assert_eq!(a_records, 3);
        assert_eq!(system.log()[4].position, round3(60.0 / 3600.0 * 3.0));
    }

    fn round3(x: f64) -> f64 {
        (x * 1000.0).round() / 1000.0
    }

    #[test]
    fn repeated_simulate_restarts_clock_and_appends() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(vec![vehicle("car", 36.0)], &sink);
        system.simulate(2.0, 1.0, Pacing::Batch).unwrap();
        system.simulate(3.0, 1.0, Pacing::Batch).unwrap();

        let times: Vec<f64> = system.log().iter().map(|r| r.sim_time).collect();
        assert_eq!(times, [0.0, 1.0, 0.0, 1.0, 2.0]);
        // Position keeps accumulating across runs: 5 ticks × 0.01 km.
        assert!((system.vehicles()[0].position_km() - 0.05).abs() < 1e-12);
        assert_eq!(system.state(), RunState::Idle);
        assert_eq!(sink.count(Level::Info), 4);
    }

    #[test]
    fn truncation_warns_about_remainder() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(vec![vehicle("car", 10.0)], &sink);
        let summary = system.simulate(5.5, 2.0, Pacing::Batch).unwrap();
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.simulated_secs, 4.0);
        assert!(sink.contains(Level::Warn, "not a multiple of dt"));
    }

    #[test]
    fn exact_policy_rejects_inexact_duration() {
        let sink = Arc::new(MemorySink::new());
        let mut system = TrafficSystemBuilder::new()
            .config(SystemConfig { duration_policy: DurationPolicy::Exact, ..Default::default() })
            .log_sink(sink.clone())
            .vehicle(vehicle("car", 10.0))
            .build()
            .unwrap();

        let err = system.simulate(5.5, 2.0, Pacing::Batch).unwrap_err();
        assert!(matches!(err, SimError::Core(TsError::InexactDuration { .. })));
        assert!(system.log().is_empty());

        let summary = system.simulate(0.3, 0.1, Pacing::Batch).unwrap();
        assert_eq!(summary.steps, 3);
    }

    #[test]
    fn invalid_dt_rejected() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(three_cars(), &sink);
        assert!(matches!(
            system.simulate(5.0, 0.0, Pacing::Batch),
            Err(SimError::Core(TsError::Config(_)))
        ));
        assert!(system.simulate(-1.0, 1.0, Pacing::Batch).is_err());
        assert!(system.log().is_empty());
    }

    #[test]
    fn realtime_pacing_sleeps_between_ticks() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(vec![vehicle("car", 10.0)], &sink);
        let start = std::time::Instant::now();
        let summary = system.simulate(0.05, 0.01, Pacing::Realtime).unwrap();
        let elapsed = start.elapsed();
        let expected = std::time::Duration::from_secs_f64(0.01) * summary.steps as u32;
        assert!(elapsed >= expected, "elapsed {elapsed:?} < {expected:?}");
        assert!(sink.contains(Level::Info, "realtime=true"));
    }

    #[test]
    fn records_are_traced_at_debug() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(three_cars(), &sink);
        system.simulate(2.0, 1.0, Pacing::Batch).unwrap();
        assert_eq!(sink.count(Level::Debug), 6);
        assert!(sink.contains(Level::Debug, "Vehicle-2"));
    }
}

// ── Behaviors inside the loop ─────────────────────────────────────────────────

#[cfg(test)]
mod behavior_tests {
    use super::*;

    fn slowdown_fleet(seed: u64) -> TrafficSystem {
        let sink = Arc::new(MemorySink::new());
        TrafficSystemBuilder::new()
            .config(SystemConfig { seed, ..Default::default() })
            .log_sink(sink)
            .vehicles((0..3).map(|i| {
                vehicle(&format!("Vehicle-{}", i + 1), 40.0).with_behavior(RandomSlowdown::default())
            }))
            .build()
            .unwrap()
    }

    #[test]
    fn slowdown_only_changes_speed_on_period() {
        let mut system = slowdown_fleet(42);
        system.simulate(25.0, 1.0, Pacing::Batch).unwrap();
        for r in system.log() {
            if r.sim_time < 10.0 {
                assert_eq!(r.speed, 40.0, "changed early at t={}", r.sim_time);
            }
            assert!(r.speed >= 0.0);
            assert!((30.0..=50.0).contains(&r.speed));
        }
    }

    #[test]
    fn sub_second_ticks_jitter_inside_first_second_only() {
        let mut system = slowdown_fleet(42);
        system.simulate(2.0, 0.5, Pacing::Batch).unwrap();
        assert_eq!(system.log().len(), 12);

        let at = |t: f64| -> Vec<f64> {
            system.log().iter().filter(|r| r.sim_time == t).map(|r| r.speed).collect()
        };
        assert!(at(0.0).iter().all(|&s| s == 40.0));

        // floor(0.5) == 0 and 0.5 > 0, so every vehicle draws a new speed.
        let jittered = at(0.5);
        assert!(jittered.iter().any(|&s| s != 40.0), "no jitter at t=0.5: {jittered:?}");
        assert!(jittered.iter().all(|s| (35.0..=45.0).contains(s)));

        // floor(1.0) == floor(1.5) == 1: no further change.
        assert_eq!(at(1.0), jittered);
        assert_eq!(at(1.5), jittered);
    }

    #[test]
    fn same_seed_same_log() {
        let mut a = slowdown_fleet(7);
        let mut b = slowdown_fleet(7);
        a.simulate(30.0, 1.0, Pacing::Batch).unwrap();
        b.simulate(30.0, 1.0, Pacing::Batch).unwrap();
        assert_eq!(a.log(), b.log());
    }

    #[test]
    fn different_seed_different_log() {
        let mut a = slowdown_fleet(1);
        let mut b = slowdown_fleet(2);
        a.simulate(30.0, 1.0, Pacing::Batch).unwrap();
        b.simulate(30.0, 1.0, Pacing::Batch).unwrap();
        assert_ne!(a.log(), b.log());
    }
}

// ── Export hand-off ───────────────────────────────────────────────────────────

#[cfg(test)]
mod export_tests {
    use super::*;

    #[test]
    fn exporter_receives_cumulative_log() {
        let sink = Arc::new(MemorySink::new());
        let exporter = RecordingExporter::default();
        let mut system = TrafficSystemBuilder::new()
            .log_sink(sink.clone())
            .exporter(exporter.clone())
            .vehicles(three_cars())
            .build()
            .unwrap();

        let first = system.simulate(2.0, 1.0, Pacing::Batch).unwrap();
        assert!(first.exported);
        system.simulate(1.0, 1.0, Pacing::Batch).unwrap();

        let calls = exporter.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 6);
        assert_eq!(calls[1].len(), 9);
        assert_eq!(calls[1].as_slice(), system.log());
        assert!(sink.contains(Level::Info, "Data log written to MEM: memory"));
    }

    #[test]
    fn no_exporter_means_no_export() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(three_cars(), &sink);
        let summary = system.simulate(1.0, 1.0, Pacing::Batch).unwrap();
        assert!(!summary.exported);
        assert!(!sink.contains(Level::Warn, "No data to export"));
    }

    #[test]
    fn export_failure_keeps_records() {
        let sink = Arc::new(MemorySink::new());
        let mut system = TrafficSystemBuilder::new()
            .log_sink(sink.clone())
            .exporter(BrokenExporter)
            .vehicles(three_cars())
            .build()
            .unwrap();

        let err = system.simulate(1.0, 1.0, Pacing::Batch).unwrap_err();
        assert!(matches!(err, SimError::Export(_)));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(system.log().len(), 3);
        assert!(sink.contains(Level::Error, "Export failed"));
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod analysis_tests {
    use super::*;

    #[test]
    fn threshold_callback_fires_once() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(vec![vehicle("fast", 45.0), vehicle("slow", 35.0)], &sink);
        system.simulate(1.0, 1.0, Pacing::Batch).unwrap();

        let mut invoked = 0;
        let mut fired = Vec::new();
        let report = system.analyze(|r| -> Result<(), String> {
            invoked += 1;
            if r.speed > 40.0 {
                fired.push(r.vehicle_id.to_string());
            }
            Ok(())
        });

        assert_eq!(invoked, 2);
        assert_eq!(fired, ["fast"]);
        assert_eq!(report.visited, 2);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn callback_errors_do_not_stop_the_scan() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(three_cars(), &sink);
        system.simulate(2.0, 1.0, Pacing::Batch).unwrap();

        let mut seen = 0;
        let report = system.analyze(|r| {
            seen += 1;
            if r.vehicle_id.as_str() == "Vehicle-2" {
                Err(format!("cannot score {}", r.vehicle_id))
            } else {
                Ok(())
            }
        });

        assert_eq!(seen, 6);
        assert_eq!(report.visited, 6);
        assert_eq!(report.failed, 2);
        assert_eq!(sink.count(Level::Error), 2);
        assert!(sink.contains(Level::Error, "cannot score Vehicle-2"));
    }

    #[test]
    fn analyze_on_empty_log_is_a_no_op() {
        let sink = Arc::new(MemorySink::new());
        let system = system_with(vec![], &sink);
        let report = system.analyze(|_r| -> Result<(), String> { panic!("must not be called") });
        assert_eq!(report.visited, 0);
    }

    #[test]
    fn speed_alert_collects_violations() {
        let sink = Arc::new(MemorySink::new());
        let mut system = system_with(three_cars(), &sink);
        system.simulate(2.0, 1.0, Pacing::Batch).unwrap();

        let mut alert = SpeedAlert::new(40.0);
        let report = system.analyze(|r| alert.inspect(r));
        assert_eq!(report.failed, 0);

        let alerts = alert.alerts();
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.vehicle_id.as_str() == "Vehicle-3"));
        assert_eq!(
            alerts[1].to_string(),
            "Alert: Vehicle-3 is speeding at 50.0 km/h (t=1.0s)"
        );
    }
}
