//! A no-op modifier: speed never changes.

use ts_core::VehicleRng;

use crate::{BehaviorResult, SpeedControl, SpeedModifier};

/// A [`SpeedModifier`] that leaves the vehicle untouched.
///
/// Equivalent to attaching no behavior at all; handy in tests and when a
/// scenario file names a behavior per vehicle.
pub struct NoopModifier;

impl SpeedModifier for NoopModifier {
    fn apply(
        &self,
        _vehicle:  &mut SpeedControl<'_>,
        _dt:       f64,
        _sim_time: f64,
        _rng:      &mut VehicleRng,
    ) -> BehaviorResult<()> {
        Ok(())
    }
}
