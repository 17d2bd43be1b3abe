//! Periodic random speed jitter.

use ts_core::VehicleRng;

use crate::{BehaviorError, BehaviorResult, SpeedControl, SpeedModifier};

/// Every `period_secs` of simulated time (excluding `t = 0`), shift the speed
/// by a uniform offset in `[-max_delta_kmh, +max_delta_kmh]` and clamp the
/// result at 0 km/h.
///
/// The trigger is `floor(sim_time) % period_secs == 0 && sim_time > 0`, so
/// with `dt < 1` several consecutive ticks inside the same whole second all
/// fire.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomSlowdown {
    period_secs:   u64,
    max_delta_kmh: f64,
}

impl RandomSlowdown {
    pub const DEFAULT_PERIOD_SECS:   u64 = 10;
    pub const DEFAULT_MAX_DELTA_KMH: f64 = 5.0;

    pub fn new(period_secs: u64, max_delta_kmh: f64) -> BehaviorResult<Self> {
        if period_secs == 0 {
            return Err(BehaviorError::Config("slowdown period must be at least 1 s".into()));
        }
        if !max_delta_kmh.is_finite() || max_delta_kmh < 0.0 {
            return Err(BehaviorError::Config(format!(
                "slowdown delta must be a non-negative number, got {max_delta_kmh}"
            )));
        }
        Ok(Self { period_secs, max_delta_kmh })
    }

    pub fn period_secs(&self) -> u64 {
        self.period_secs
    }

    pub fn max_delta_kmh(&self) -> f64 {
        self.max_delta_kmh
    }

    /// Whether the jitter fires at `sim_time`.
    #[inline]
    pub fn fires_at(&self, sim_time: f64) -> bool {
        sim_time > 0.0 && (sim_time.floor() as u64) % self.period_secs == 0
    }
}

impl Default for RandomSlowdown {
    fn default() -> Self {
        Self {
            period_secs:   Self::DEFAULT_PERIOD_SECS,
            max_delta_kmh: Self::DEFAULT_MAX_DELTA_KMH,
        }
    }
}

impl SpeedModifier for RandomSlowdown {
    fn apply(
        &self,
        vehicle:  &mut SpeedControl<'_>,
        _dt:      f64,
        sim_time: f64,
        rng:      &mut VehicleRng,
    ) -> BehaviorResult<()> {
        if !self.fires_at(sim_time) {
            return Ok(());
        }
        let change: f64 = rng.gen_range(-self.max_delta_kmh..=self.max_delta_kmh);
        vehicle.set_speed_kmh((vehicle.speed_kmh() + change).max(0.0));
        Ok(())
    }
}
