//! Traffic system configuration.

use ts_core::{StepPlan, TsResult};

/// How `simulate` treats a `duration` that is not a whole multiple of `dt`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DurationPolicy {
    /// Run `floor(duration / dt)` ticks and warn about the dropped remainder.
    #[default]
    Truncate,
    /// Reject the run with `TsError::InexactDuration`.
    Exact,
}

impl DurationPolicy {
    /// Build the step plan for one `simulate` call under this policy.
    pub fn plan(self, duration_secs: f64, dt_secs: f64) -> TsResult<StepPlan> {
        match self {
            DurationPolicy::Truncate => StepPlan::truncating(duration_secs, dt_secs),
            DurationPolicy::Exact    => StepPlan::exact(duration_secs, dt_secs),
        }
    }
}

/// Wall-clock pacing of the tick loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Pacing {
    /// As fast as possible.
    #[default]
    Batch,
    /// Sleep `dt` wall seconds after every tick.  No drift correction and no
    /// way to interrupt the run.
    Realtime,
}

impl Pacing {
    #[inline]
    pub fn is_realtime(self) -> bool {
        matches!(self, Pacing::Realtime)
    }
}

impl From<bool> for Pacing {
    fn from(realtime: bool) -> Self {
        if realtime { Pacing::Realtime } else { Pacing::Batch }
    }
}

/// Top-level traffic system configuration.
#[derive(Clone, Debug, Default)]
pub struct SystemConfig {
    /// Master RNG seed.  The same seed and fleet always produce the same log.
    pub seed:            u64,
    pub duration_policy: DurationPolicy,
}
