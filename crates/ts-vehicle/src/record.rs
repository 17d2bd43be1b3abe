//! Plain data types produced by transponders.

use serde::{Deserialize, Serialize};
use ts_core::VehicleId;

/// Decimal digits kept for speed (km/h) in readings.
pub const SPEED_DECIMALS: usize = 2;

/// Decimal digits kept for position (km) in readings.
pub const POSITION_DECIMALS: usize = 3;

/// Round `value` to `decimals` digits.
///
/// Rounds the exact decimal expansion of `value`, ties to even, so `2.675`
/// (stored just below) gives `2.67` and `0.125` gives `0.12`.  Large values
/// pass through unchanged instead of overflowing a scale factor.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// A transponder reading before it is timestamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub vehicle_id: VehicleId,
    /// km/h, rounded to [`SPEED_DECIMALS`].
    pub speed:      f64,
    /// km, rounded to [`POSITION_DECIMALS`].
    pub position:   f64,
}

impl Reading {
    /// Attach the simulation time the reading was taken at.
    pub fn stamp(self, sim_time: f64) -> Record {
        Record {
            vehicle_id: self.vehicle_id,
            speed:      self.speed,
            position:   self.position,
            sim_time,
        }
    }
}

/// One timestamped observation in the traffic log.
///
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub vehicle_id: VehicleId,
    pub speed:      f64,
    pub position:   f64,
    /// Seconds since the start of the `simulate` call that produced it.
    pub sim_time:   f64,
}
