//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `TsError` as one variant
//! where a core operation (step planning, id validation) can fail.

use thiserror::Error;

/// The error type for `ts-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("duration {duration_secs}s is not a whole multiple of dt {dt_secs}s")]
    InexactDuration {
        duration_secs: f64,
        dt_secs:       f64,
    },
}

/// Shorthand result type for `ts-core`.
pub type TsResult<T> = Result<T, TsError>;
