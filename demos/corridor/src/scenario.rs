//! Fleet definitions: generated from CLI flags or loaded from a JSON file.
//!
//! ```json
//! {
//!   "vehicles": [
//!     { "id": "Vehicle-1", "speed": 42.0, "behavior": { "kind": "random_slowdown" } },
//!     { "id": "Truck-7",   "speed": 55.0, "behavior": { "kind": "random_slowdown", "period_secs": 5, "max_delta_kmh": 2.5 } },
//!     { "id": "Bus-2",     "speed": 30.0 }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use ts_behavior::{NoopModifier, RandomSlowdown};
use ts_core::SimRng;
use ts_vehicle::Vehicle;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub vehicles: Vec<VehicleSpec>,
}

#[derive(Debug, Deserialize)]
pub struct VehicleSpec {
    pub id:       String,
    /// Initial speed, km/h.
    pub speed:    f64,
    #[serde(default)]
    pub behavior: BehaviorSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorSpec {
    #[default]
    None,
    RandomSlowdown {
        period_secs:   Option<u64>,
        max_delta_kmh: Option<f64>,
    },
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        Ok(scenario)
    }

    /// `count` vehicles named `Vehicle-1..=count`, each with a whole-number
    /// speed drawn from `min_speed..=max_speed` km/h and the default
    /// `RandomSlowdown`.
    pub fn generated(count: usize, min_speed: u32, max_speed: u32, rng: &mut SimRng) -> Result<Self> {
        if min_speed > max_speed {
            bail!("min speed {min_speed} exceeds max speed {max_speed}");
        }
        let vehicles = (0..count)
            .map(|i| VehicleSpec {
                id:       format!("Vehicle-{}", i + 1),
                speed:    rng.gen_range(min_speed..=max_speed) as f64,
                behavior: BehaviorSpec::RandomSlowdown { period_secs: None, max_delta_kmh: None },
            })
            .collect();
        Ok(Self { vehicles })
    }

    pub fn build_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.vehicles.iter().map(VehicleSpec::build).collect()
    }
}

impl VehicleSpec {
    fn build(&self) -> Result<Vehicle> {
        let vehicle = Vehicle::named(&self.id, self.speed)
            .with_context(|| format!("vehicle {:?}", self.id))?;
        let vehicle = match self.behavior {
            BehaviorSpec::None => vehicle.with_behavior(NoopModifier),
            BehaviorSpec::RandomSlowdown { period_secs, max_delta_kmh } => {
                let slowdown = RandomSlowdown::new(
                    period_secs.unwrap_or(RandomSlowdown::DEFAULT_PERIOD_SECS),
                    max_delta_kmh.unwrap_or(RandomSlowdown::DEFAULT_MAX_DELTA_KMH),
                )
                .with_context(|| format!("behavior for {}", self.id))?;
                vehicle.with_behavior(slowdown)
            }
        };
        Ok(vehicle)
    }
}
