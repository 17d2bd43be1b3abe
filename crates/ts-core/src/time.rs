//! Simulation time model.
//!
//! # Design
//!
//! A run is `steps` discrete ticks of `dt` simulated seconds each.  The step
//! count comes from a [`StepPlan`]:
//!
//!   steps = floor(duration / dt)
//!
//! so a duration that is not a whole multiple of `dt` simulates *less* time
//! than requested.  [`StepPlan::truncating`] keeps that behavior and reports
//! the unsimulated remainder; [`StepPlan::exact`] rejects such durations.
//!
//! Inside a run the clock is a float `sim_time` that starts at 0 and is
//! advanced by `dt` *after* each tick, so the last tick observes
//! `(steps - 1) * dt`, never `duration`.

use std::fmt;

use crate::{TsError, TsResult};

/// Relative tolerance used when deciding whether `duration / dt` is integral.
const EXACT_TOLERANCE: f64 = 1e-9;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Index of a tick within one run, counted from 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepPlan ──────────────────────────────────────────────────────────────────

/// How many ticks a `simulate(duration, dt)` call runs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepPlan {
    /// Requested simulated duration in seconds.
    pub duration_secs: f64,
    /// Seconds per tick.
    pub dt_secs:       f64,
    /// Number of ticks to run.
    pub steps:         u64,
}

impl StepPlan {
    /// Plan `floor(duration / dt)` steps.
    ///
    /// Fails if `dt` is not a finite positive number or `duration` is not a
    /// finite non-negative number.
    pub fn truncating(duration_secs: f64, dt_secs: f64) -> TsResult<Self> {
        validate(duration_secs, dt_secs)?;
        let steps = (duration_secs / dt_secs).floor() as u64;
        Ok(Self { duration_secs, dt_secs, steps })
    }

    /// Plan `duration / dt` steps, rejecting durations that are not a whole
    /// multiple of `dt`.
    ///
    /// Ratios within a relative 1e-9 of an integer count as exact, so
    /// `exact(0.3, 0.1)` plans 3 steps where `truncating` would plan 2.
    pub fn exact(duration_secs: f64, dt_secs: f64) -> TsResult<Self> {
        validate(duration_secs, dt_secs)?;
        let ratio = duration_secs / dt_secs;
        let nearest = ratio.round();
        if (ratio - nearest).abs() > EXACT_TOLERANCE * nearest.max(1.0) {
            return Err(TsError::InexactDuration { duration_secs, dt_secs });
        }
        Ok(Self { duration_secs, dt_secs, steps: nearest as u64 })
    }

    /// Simulated seconds actually covered: `steps * dt`.
    #[inline]
    pub fn simulated_secs(&self) -> f64 {
        self.steps as f64 * self.dt_secs
    }

    /// Requested seconds that the plan does not cover (0 when exact).
    pub fn remainder_secs(&self) -> f64 {
        let rem = self.duration_secs - self.simulated_secs();
        if rem <= EXACT_TOLERANCE * self.duration_secs.max(1.0) {
            0.0
        } else {
            rem
        }
    }

    /// Construct a fresh [`SimClock`] for this plan.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }
}

fn validate(duration_secs: f64, dt_secs: f64) -> TsResult<()> {
    if !dt_secs.is_finite() || dt_secs <= 0.0 {
        return Err(TsError::Config(format!("dt must be a positive number, got {dt_secs}")));
    }
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(TsError::Config(format!(
            "duration must be a non-negative number, got {duration_secs}"
        )));
    }
    Ok(())
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Per-run simulation clock.
///
/// Every `simulate` call builds its own clock, so each run restarts at
/// `sim_time == 0.0` regardless of earlier runs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds per tick.
    pub dt_secs:      f64,
    /// Simulated seconds at the current tick.
    pub sim_time:     f64,
    /// The current tick, advanced together with `sim_time`.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f64) -> Self {
        Self {
            dt_secs,
            sim_time:     0.0,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance by one tick.  `sim_time` accumulates `dt` (no re-derivation
    /// from the tick count).
    #[inline]
    pub fn advance(&mut self) {
        self.sim_time += self.dt_secs;
        self.current_tick = Tick(self.current_tick.0 + 1);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={}s)", self.current_tick, self.sim_time)
    }
}
