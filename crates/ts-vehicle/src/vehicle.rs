//! The `Vehicle` type and its per-tick update.

use std::fmt;

use ts_behavior::{SpeedControl, SpeedModifier};
use ts_core::{Level, LogSink, TsResult, VehicleId, VehicleRng};

/// Seconds per hour; converts km/h × s into km.
const SECS_PER_HOUR: f64 = 3600.0;

/// Result of one [`Vehicle::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No modifier attached, or it returned `Ok`.
    Clean,
    /// The modifier returned `Err`; the vehicle still moved.
    BehaviorFailed,
}

/// A vehicle travelling along an unbounded one-dimensional road.
///
/// Position starts at 0 km.  Speed is never clamped here: a negative speed
/// moves the vehicle backwards.  Keeping speed non-negative is a modifier
/// policy (see `RandomSlowdown`).
pub struct Vehicle {
    id:          VehicleId,
    speed_kmh:   f64,
    position_km: f64,
    behavior:    Option<Box<dyn SpeedModifier>>,
}

impl Vehicle {
    pub fn new(id: VehicleId, speed_kmh: f64) -> Self {
        Self {
            id,
            speed_kmh,
            position_km: 0.0,
            behavior: None,
        }
    }

    /// Shorthand for `Vehicle::new(VehicleId::new(id)?, speed_kmh)`.
    pub fn named(id: &str, speed_kmh: f64) -> TsResult<Self> {
        Ok(Self::new(VehicleId::new(id)?, speed_kmh))
    }

    /// Attach the per-tick speed modifier.  Replaces any previous one.
    pub fn with_behavior<M: SpeedModifier>(mut self, behavior: M) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    #[inline]
    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    #[inline]
    pub fn position_km(&self) -> f64 {
        self.position_km
    }

    #[inline]
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    pub fn set_speed_kmh(&mut self, speed_kmh: f64) {
        self.speed_kmh = speed_kmh;
    }

    /// Run one tick: apply the modifier (if any), then integrate position.
    ///
    /// A modifier error is emitted as a warning on `log` and does not stop
    /// integration; the speed it left behind is used.
    pub fn update(
        &mut self,
        dt:       f64,
        sim_time: f64,
        rng:      &mut VehicleRng,
        log:      &dyn LogSink,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::Clean;

        if let Some(behavior) = &self.behavior {
            let mut ctl = SpeedControl::new(&self.id, self.position_km, &mut self.speed_kmh);
            if let Err(e) = behavior.apply(&mut ctl, dt, sim_time, rng) {
                log.emit(Level::Warn, &format!("Behavior error for {}: {e}", self.id));
                outcome = TickOutcome::BehaviorFailed;
            }
        }

        self.integrate(dt);
        outcome
    }

    /// `position += speed / 3600 * dt`.
    #[inline]
    pub fn integrate(&mut self, dt: f64) {
        self.position_km += (self.speed_kmh / SECS_PER_HOUR) * dt;
    }
}

impl fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("id", &self.id)
            .field("speed_kmh", &self.speed_kmh)
            .field("position_km", &self.position_km)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}
