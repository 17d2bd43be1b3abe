//! Vehicle identifiers.
//!
//! A vehicle carries two ids: the caller-chosen [`VehicleId`] string that
//! appears in every exported record, and the [`VehicleSlot`] the traffic
//! system assigns at registration.  The slot is the index into every
//! per-vehicle `Vec` the system keeps and the input to RNG seeding.

use std::fmt;

use crate::{TsError, TsResult};

// ── VehicleId ─────────────────────────────────────────────────────────────────

/// Immutable, caller-chosen vehicle identity (e.g. `"Vehicle-1"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VehicleId(String);

impl VehicleId {
    /// Build an id, rejecting empty or all-whitespace strings.
    pub fn new(id: impl Into<String>) -> TsResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TsError::Config("vehicle id must not be empty".into()));
        }
        Ok(Self(id))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for VehicleId {
    type Error = TsError;
    fn try_from(s: &str) -> TsResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for VehicleId {
    type Error = TsError;
    fn try_from(s: String) -> TsResult<Self> {
        Self::new(s)
    }
}

// ── VehicleSlot ───────────────────────────────────────────────────────────────

/// Registration index of a vehicle inside a traffic system.
///
/// Slots are handed out densely from 0 in `add_vehicle` order and never
/// reused (there is no de-registration).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSlot(pub u32);

impl VehicleSlot {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VehicleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleSlot({})", self.0)
    }
}

impl From<VehicleSlot> for usize {
    #[inline(always)]
    fn from(slot: VehicleSlot) -> usize {
        slot.0 as usize
    }
}

impl TryFrom<usize> for VehicleSlot {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<VehicleSlot, Self::Error> {
        u32::try_from(n).map(VehicleSlot)
    }
}
