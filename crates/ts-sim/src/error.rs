use thiserror::Error;
use ts_core::{TsError, VehicleId};

use crate::ExportError;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid `dt`/`duration`, or an inexact duration under
    /// `DurationPolicy::Exact`.
    #[error(transparent)]
    Core(#[from] TsError),

    #[error("vehicle {0} is already registered")]
    DuplicateVehicle(VehicleId),

    #[error("traffic system configuration error: {0}")]
    Config(String),

    #[error("export failed: {0}")]
    Export(#[source] ExportError),
}

pub type SimResult<T> = Result<T, SimError>;
