//! Error types for component account construction.

use om_core::error::OmError;
use om_reliability::ReliabilityError;
use thiserror::Error;

/// Hard errors: the inputs cannot describe any account at all.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Lifetime model error: {0}")]
    Reliability(#[from] ReliabilityError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for OmError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidArg { what } => OmError::InvalidArg { what },
            ComponentError::Reliability(inner) => inner.into(),
        }
    }
}
