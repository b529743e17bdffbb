//! Plant aggregation errors.

use om_components::ComponentError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PlantError {
    #[error("Invalid plant parameter: {what}")]
    InvalidArg { what: &'static str },

    #[error("Staffing role '{role}' has {len} headcount entries, horizon needs {years}")]
    StaffingTooShort {
        role: String,
        len: usize,
        years: usize,
    },

    #[error("Component {component} ledger covers {len} years, plant horizon is {years}")]
    HorizonMismatch {
        component: String,
        len: usize,
        years: usize,
    },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

pub type PlantResult<T> = Result<T, PlantError>;
