//! The speed-control view handed to every modifier.

use ts_core::VehicleId;

/// Mutable access to one vehicle's speed, plus read-only identity and
/// position.
///
/// Built by the vehicle for the duration of a single modifier call.  The
/// borrow on `speed_kmh` ends when the call returns, so a modifier cannot
/// hold on to the vehicle between ticks.
pub struct SpeedControl<'a> {
    id:          &'a VehicleId,
    position_km: f64,
    speed_kmh:   &'a mut f64,
}

impl<'a> SpeedControl<'a> {
    #[inline]
    pub fn new(id: &'a VehicleId, position_km: f64, speed_kmh: &'a mut f64) -> Self {
        Self { id, position_km, speed_kmh }
    }

    #[inline]
    pub fn id(&self) -> &VehicleId {
        self.id
    }

    /// Position at the start of this tick, in km.
    #[inline]
    pub fn position_km(&self) -> f64 {
        self.position_km
    }

    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        *self.speed_kmh
    }

    /// Overwrite the speed.  No clamping; floors are the modifier's job.
    #[inline]
    pub fn set_speed_kmh(&mut self, speed_kmh: f64) {
        *self.speed_kmh = speed_kmh;
    }
}
