//! Post-run analysis over the record log.

use std::convert::Infallible;
use std::fmt;

use ts_core::VehicleId;
use ts_vehicle::Record;

/// Outcome of one [`TrafficSystem::analyze`][crate::TrafficSystem::analyze]
/// pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Records the callback was invoked on.
    pub visited: usize,
    /// Invocations that returned `Err`.
    pub failed:  usize,
}

/// A record whose speed exceeded a [`SpeedAlert`] threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub vehicle_id: VehicleId,
    pub speed:      f64,
    pub sim_time:   f64,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alert: {} is speeding at {:?} km/h (t={:?}s)",
            self.vehicle_id, self.speed, self.sim_time
        )
    }
}

/// Flags every record with `speed > threshold_kmh`.
///
/// ```rust,ignore
/// let mut alert = SpeedAlert::new(40.0);
/// system.analyze(|r| alert.inspect(r));
/// for a in alert.alerts() { println!("{a}"); }
/// ```
#[derive(Clone, Debug)]
pub struct SpeedAlert {
    threshold_kmh: f64,
    alerts:        Vec<Alert>,
}

impl SpeedAlert {
    pub fn new(threshold_kmh: f64) -> Self {
        Self { threshold_kmh, alerts: Vec::new() }
    }

    pub fn threshold_kmh(&self) -> f64 {
        self.threshold_kmh
    }

    /// Check one record.  Never fails; the `Result` matches the analysis
    /// callback shape.
    pub fn inspect(&mut self, record: &Record) -> Result<(), Infallible> {
        if record.speed > self.threshold_kmh {
            self.alerts.push(Alert {
                vehicle_id: record.vehicle_id.clone(),
                speed:      record.speed,
                sim_time:   record.sim_time,
            });
        }
        Ok(())
    }

    /// Alerts raised so far, in log order.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts
    }
}
