//! Error types for lifetime model construction.

use om_core::OmError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReliabilityError {
    #[error("Invalid Weibull parameter: {what} = {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("Invalid population: {value}")]
    InvalidPopulation { value: f64 },

    #[error("Invalid horizon: {years} years")]
    InvalidHorizon { years: usize },
}

pub type ReliabilityResult<T> = Result<T, ReliabilityError>;

impl From<ReliabilityError> for OmError {
    fn from(e: ReliabilityError) -> Self {
        match e {
            ReliabilityError::InvalidParameter { what, .. } => OmError::InvalidArg { what },
            ReliabilityError::InvalidPopulation { .. } => OmError::InvalidArg {
                what: "population",
            },
            ReliabilityError::InvalidHorizon { .. } => OmError::InvalidArg { what: "horizon" },
        }
    }
}
