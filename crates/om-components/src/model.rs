//! Failure-model resolution from catalog fields.

use om_reliability::WeibullParams;
use serde::{Deserialize, Serialize};

use crate::diagnostic::ConfigurationError;
use crate::spec::{ComponentSpec, PredictionTag};

/// How expected failures are projected for a part.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FailureModel {
    Weibull { params: WeibullParams },
    /// `percent` of the population fails over the whole horizon, spread evenly.
    ConstantRate { percent: f64 },
}

impl FailureModel {
    /// Zero-failure placeholder used for misconfigured parts.
    pub const ZERO: FailureModel = FailureModel::ConstantRate { percent: 0.0 };

    /// Resolve the model for `spec`, degrading to [`FailureModel::ZERO`] with a
    /// diagnostic when the catalog fields do not describe a usable model.
    pub fn resolve(spec: &ComponentSpec) -> (FailureModel, Option<ConfigurationError>) {
        let key = spec.key.clone();
        match &spec.prediction {
            PredictionTag::Weibull => {
                match WeibullParams::from_optional(spec.weibull_shape, spec.weibull_scale) {
                    Ok(params) => (FailureModel::Weibull { params }, None),
                    Err(e) => (
                        FailureModel::ZERO,
                        Some(ConfigurationError::InvalidWeibull {
                            key,
                            reason: e.to_string(),
                        }),
                    ),
                }
            }
            PredictionTag::ConstantRate => match spec.fail_percent {
                Some(percent) if percent.is_finite() && percent >= 0.0 => {
                    (FailureModel::ConstantRate { percent }, None)
                }
                value => (
                    FailureModel::ZERO,
                    Some(ConfigurationError::InvalidConstantRate { key, value }),
                ),
            },
            PredictionTag::Unspecified => (
                FailureModel::ZERO,
                Some(ConfigurationError::UnspecifiedPrediction { key }),
            ),
            PredictionTag::Unknown { tag } => (
                FailureModel::ZERO,
                Some(ConfigurationError::UnknownPrediction {
                    key,
                    tag: tag.clone(),
                }),
            ),
        }
    }

    pub fn weibull_params(&self) -> Option<WeibullParams> {
        match self {
            FailureModel::Weibull { params } => Some(*params),
            FailureModel::ConstantRate { .. } => None,
        }
    }
}
