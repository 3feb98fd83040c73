use cq_core::StationId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} must be finite and {bound}, got {value}")]
    InvalidParam {
        what:  &'static str,
        bound: &'static str,
        value: f64,
    },

    #[error("station id {0} is used more than once")]
    DuplicateStation(StationId),
}

pub type SimResult<T> = Result<T, SimError>;
