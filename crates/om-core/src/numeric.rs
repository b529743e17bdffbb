use crate::OmError;

/// Floating point type used throughout system
pub type Real = f64;

/// Offset added before flooring cumulative failure counts.
///
/// Repeated addition drifts just under whole numbers (ten additions of 0.6
/// land on 5.999...), which would drop an event when floored.
pub const DRIFT_EPSILON: Real = 1e-7;

/// Longest supported projection horizon (years).
///
/// Failure tables hold `years * (years - 1)` cells.
pub const MAX_HORIZON_YEARS: usize = 100;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, OmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(OmError::NonFinite { what, value: v })
    }
}

/// Floor a cumulative count after nudging it by `epsilon`.
#[inline]
pub fn floor_with_drift(v: Real, epsilon: Real) -> Real {
    (v + epsilon).floor()
}

/// Round to one decimal place the way the legacy spreadsheet did.
///
/// Rounds the exact decimal value of `v`, so `0.15` (stored as 0.1499...)
/// becomes `0.1`; scaling by ten first would give `0.2`. Exact ties round
/// away from zero (`0.25` to `0.3`, `-0.25` to `-0.3`).
pub fn round_to_tenths(v: Real) -> Real {
    if !v.is_finite() {
        return v;
    }
    // The only exact ties at one decimal are the odd quarters, x.25 and x.75.
    let quarters = v * 4.0;
    let v = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        if v > 0.0 { v.next_up() } else { v.next_down() }
    } else {
        v
    };
    format!("{v:.1}").parse::<Real>().unwrap_or(v)
}
