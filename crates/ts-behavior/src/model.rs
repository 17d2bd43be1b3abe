//! The `SpeedModifier` trait, the extension point for per-vehicle behavior.

use ts_core::VehicleRng;

use crate::{BehaviorResult, SpeedControl};

/// Pluggable per-tick vehicle behavior.
///
/// Attached to a vehicle at construction and called once per tick with the
/// tick length `dt` (seconds) and the run's `sim_time` (seconds since the
/// start of the current `simulate` call).  Randomness must come from the
/// supplied per-vehicle [`VehicleRng`] so runs stay reproducible.
///
/// Implementations should be cheap and tolerate being called more than once
/// at the same `sim_time`.
///
/// # Example
///
/// ```rust,ignore
/// struct SpeedCap(f64);
///
/// impl SpeedModifier for SpeedCap {
///     fn apply(&self, v: &mut SpeedControl<'_>, _dt: f64, _t: f64, _rng: &mut VehicleRng)
///         -> BehaviorResult<()>
///     {
///         v.set_speed_kmh(v.speed_kmh().min(self.0));
///         Ok(())
///     }
/// }
/// ```
pub trait SpeedModifier: Send + Sync + 'static {
    /// Possibly rewrite the vehicle's speed for this tick.
    ///
    /// Returning `Err` is reported as a warning by the vehicle; any speed
    /// change made before the error is kept.
    fn apply(
        &self,
        vehicle:  &mut SpeedControl<'_>,
        dt:       f64,
        sim_time: f64,
        rng:      &mut VehicleRng,
    ) -> BehaviorResult<()>;
}

impl<M: SpeedModifier + ?Sized> SpeedModifier for Box<M> {
    fn apply(
        &self,
        vehicle:  &mut SpeedControl<'_>,
        dt:       f64,
        sim_time: f64,
        rng:      &mut VehicleRng,
    ) -> BehaviorResult<()> {
        (**self).apply(vehicle, dt, sim_time, rng)
    }
}

/// A [`SpeedModifier`] backed by a closure.  Build with [`from_fn`].
pub struct FnModifier<F>(F);

/// Wrap a closure as a [`SpeedModifier`].
///
/// ```rust,ignore
/// let brake = from_fn(|v, _dt, _t, _rng| {
///     v.set_speed_kmh((v.speed_kmh() - 1.0).max(0.0));
///     Ok(())
/// });
/// ```
pub fn from_fn<F>(f: F) -> FnModifier<F>
where
    F: Fn(&mut SpeedControl<'_>, f64, f64, &mut VehicleRng) -> BehaviorResult<()>
        + Send
        + Sync
        + 'static,
{
    FnModifier(f)
}

impl<F> SpeedModifier for FnModifier<F>
where
    F: Fn(&mut SpeedControl<'_>, f64, f64, &mut VehicleRng) -> BehaviorResult<()>
        + Send
        + Sync
        + 'static,
{
    fn apply(
        &self,
        vehicle:  &mut SpeedControl<'_>,
        dt:       f64,
        sim_time: f64,
        rng:      &mut VehicleRng,
    ) -> BehaviorResult<()> {
        (self.0)(vehicle, dt, sim_time, rng)
    }
}
