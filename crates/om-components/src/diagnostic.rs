//! Recoverable configuration problems.

use om_core::ComponentKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A catalog or model problem that was absorbed by degrading the affected
/// part to zero failures (or by skipping a patch record).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConfigurationError {
    #[error("Missing or invalid Weibull parameters for {key} ({reason}) - set to 0 failures")]
    InvalidWeibull { key: ComponentKey, reason: String },

    #[error("No failure prediction specified for {key} - set to 0 failures")]
    UnspecifiedPrediction { key: ComponentKey },

    #[error("Unknown failure mode '{tag}' specified for {key} - set to 0 failures")]
    UnknownPrediction { key: ComponentKey, tag: String },

    #[error("Missing or invalid constant failure rate for {key} - set to 0 failures")]
    InvalidConstantRate { key: ComponentKey, value: Option<f64> },

    #[error("Non-finite repair cost for {key} - set to 0 cost")]
    NonFiniteCost { key: ComponentKey },

    #[error("Crane override references unknown component {key}")]
    UnknownOverrideTarget { key: ComponentKey },

    #[error("Duplicate component {key} - later record ignored")]
    DuplicateComponent { key: ComponentKey },
}

impl ConfigurationError {
    pub fn key(&self) -> &ComponentKey {
        match self {
            ConfigurationError::InvalidWeibull { key, .. }
            | ConfigurationError::UnspecifiedPrediction { key }
            | ConfigurationError::UnknownPrediction { key, .. }
            | ConfigurationError::InvalidConstantRate { key, .. }
            | ConfigurationError::NonFiniteCost { key }
            | ConfigurationError::UnknownOverrideTarget { key }
            | ConfigurationError::DuplicateComponent { key } => key,
        }
    }
}
