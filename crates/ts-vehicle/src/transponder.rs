//! Stateless per-vehicle snapshot adapter.

use crate::{POSITION_DECIMALS, Reading, SPEED_DECIMALS, Vehicle, round_to};

/// Read-only view bound to one vehicle.
///
/// Holds nothing but the borrow, so it is free to create and every
/// [`snapshot`][Self::snapshot] is a pure function of the vehicle's current
/// state.
#[derive(Debug, Clone, Copy)]
pub struct Transponder<'a> {
    vehicle: &'a Vehicle,
}

impl<'a> Transponder<'a> {
    #[inline]
    pub fn attach(vehicle: &'a Vehicle) -> Self {
        Self { vehicle }
    }

    /// The vehicle this transponder is bound to.
    #[inline]
    pub fn vehicle(&self) -> &'a Vehicle {
        self.vehicle
    }

    /// Current speed and position at fixed precision.
    pub fn snapshot(&self) -> Reading {
        Reading {
            vehicle_id: self.vehicle.id().clone(),
            speed:      round_to(self.vehicle.speed_kmh(), SPEED_DECIMALS),
            position:   round_to(self.vehicle.position_km(), POSITION_DECIMALS),
        }
    }
}
