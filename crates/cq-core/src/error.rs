//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! surface core failures.

use thiserror::Error;

/// The top-level error type for `cq-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("calibration parse error: {0}")]
    Parse(String),

    #[error("calibration data contains no customer transactions")]
    EmptyCalibration,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `cq-core`.
pub type CoreResult<T> = Result<T, CoreError>;
