//! Plant-level inputs.

use om_core::MAX_HORIZON_YEARS;
use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};

/// Physical and flat-rate plant inputs. Monetary values are USD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantParams {
    /// Project horizon (years)
    pub years: usize,
    /// Rated power per turbine (kW)
    pub turbine_rating_kw: f64,
    pub turbine_count: u32,
    /// Capacity factor (0, 1]
    pub capacity_factor: f64,
    /// Consumables per turbine per year
    pub consumables_per_turbine: f64,
    /// Site maintenance per year
    pub site_maintenance: f64,
    /// Equipment per year
    pub equipment: f64,
    /// Wage burden (benefits/overhead fraction on top of base pay)
    pub burden: f64,
}

impl Default for PlantParams {
    fn default() -> Self {
        Self {
            years: 20,
            turbine_rating_kw: 1500.0,
            turbine_count: 60,
            capacity_factor: 0.44,
            consumables_per_turbine: 2348.0,
            site_maintenance: 14_000.0,
            equipment: 24_000.0,
            burden: 0.35,
        }
    }
}

impl PlantParams {
    pub fn validate(&self) -> PlantResult<()> {
        if self.years == 0 {
            return Err(PlantError::InvalidArg {
                what: "horizon must be at least one year",
            });
        }
        if self.years > MAX_HORIZON_YEARS {
            return Err(PlantError::InvalidArg {
                what: "horizon exceeds the longest supported projection",
            });
        }
        if self.turbine_count == 0 {
            return Err(PlantError::InvalidArg {
                what: "turbine count must be positive",
            });
        }
        if !self.turbine_rating_kw.is_finite() || self.turbine_rating_kw <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "turbine rating must be positive",
            });
        }
        if !self.capacity_factor.is_finite()
            || self.capacity_factor <= 0.0
            || self.capacity_factor > 1.0
        {
            return Err(PlantError::InvalidArg {
                what: "capacity factor must be in (0,1]",
            });
        }
        for (v, what) in [
            (self.consumables_per_turbine, "consumables rate must be non-negative"),
            (self.site_maintenance, "site maintenance must be non-negative"),
            (self.equipment, "equipment must be non-negative"),
            (self.burden, "burden must be non-negative"),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(PlantError::InvalidArg { what });
            }
        }
        Ok(())
    }

    /// Installed capacity (kW).
    pub fn plant_capacity_kw(&self) -> f64 {
        self.turbine_rating_kw * f64::from(self.turbine_count)
    }

    /// Consumables cost for the whole plant per year.
    pub fn consumables_per_year(&self) -> f64 {
        f64::from(self.turbine_count) * self.consumables_per_turbine
    }
}
