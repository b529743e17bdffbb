//! Two-parameter Weibull lifetime model.

use crate::error::{ReliabilityError, ReliabilityResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weibull failure-rate density at age `x`:
///
/// ```text
/// w(x, k, c) = (k/c) * (x/c)^(k-1) * exp(-(x/c)^k)
/// ```
///
/// Used as the fraction of a surviving population expected to fail during
/// the year it reaches age `x`. Callers guarantee `x > 0`, `k > 0`, `c > 0`;
/// [`WeibullParams`] enforces the parameter half of that.
#[inline]
pub fn weibull_density(x: f64, k: f64, c: f64) -> f64 {
    let r = x / c;
    (k / c) * r.powf(k - 1.0) * (-r.powf(k)).exp()
}

/// Validated Weibull shape (`k`) and scale (`c`, years).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeibullParams {
    shape: f64,
    scale: f64,
}

impl WeibullParams {
    /// Create parameters, rejecting non-finite or non-positive values.
    pub fn new(shape: f64, scale: f64) -> ReliabilityResult<Self> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(ReliabilityError::InvalidParameter {
                what: "shape",
                value: shape,
            });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ReliabilityError::InvalidParameter {
                what: "scale",
                value: scale,
            });
        }
        Ok(Self { shape, scale })
    }

    /// Build from optional catalog fields. Missing values are invalid.
    pub fn from_optional(shape: Option<f64>, scale: Option<f64>) -> ReliabilityResult<Self> {
        match (shape, scale) {
            (Some(k), Some(c)) => Self::new(k, c),
            (None, _) => Err(ReliabilityError::InvalidParameter {
                what: "shape",
                value: f64::NAN,
            }),
            (_, None) => Err(ReliabilityError::InvalidParameter {
                what: "scale",
                value: f64::NAN,
            }),
        }
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn density(&self, age: f64) -> f64 {
        weibull_density(age, self.shape, self.scale)
    }

    /// Probability that a unit survives past `age`.
    pub fn reliability(&self, age: f64) -> f64 {
        if age <= 0.0 {
            return 1.0;
        }
        (-(age / self.scale).powf(self.shape)).exp()
    }

    /// Age by which half of a population has failed.
    ///
    /// Reported as "mean life" in the legacy O&M sheets.
    pub fn median_life(&self) -> f64 {
        self.scale * std::f64::consts::LN_2.powf(1.0 / self.shape)
    }
}
