//! Plant configuration schema.

use std::path::PathBuf;

use om_components::{AccountOptions, CellRounding};
use om_core::DRIFT_EPSILON;
use om_plant::{PlantParams, StaffRole, StaffingTable};
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;
use crate::{ProjectError, ProjectResult};

pub const LATEST_VERSION: u32 = 1;

/// Plant configuration file.
///
/// Every field except `name` and `catalog` falls back to the GEC baseline
/// plant (60 x 1.5 MW turbines, 20 years):
///
/// ```yaml
/// name: Baseline
/// catalog: components.csv
/// turbine_count: 80
/// numerics:
///   round_weibull_cells: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    /// Component catalog CSV, relative to the configuration file
    pub catalog: PathBuf,
    /// Optional file of `CRANE` override records, applied after the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crane_overrides: Option<PathBuf>,
    #[serde(default = "default_horizon")]
    pub horizon_years: usize,
    #[serde(default = "default_rating")]
    pub turbine_rating_kw: f64,
    #[serde(default = "default_turbines")]
    pub turbine_count: u32,
    #[serde(default = "default_capacity_factor")]
    pub capacity_factor: f64,
    #[serde(default = "default_consumables")]
    pub consumables_per_turbine: f64,
    #[serde(default = "default_site_maintenance")]
    pub site_maintenance: f64,
    #[serde(default = "default_equipment")]
    pub equipment: f64,
    #[serde(default = "default_burden")]
    pub burden: f64,
    /// Burdened repair labor rate (USD/hour); derived from technician wages if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_rate: Option<f64>,
    #[serde(default = "default_escalation")]
    pub escalation: f64,
    #[serde(default)]
    pub numerics: NumericsDef,
    /// Staffing roles; the GEC baseline crew if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staffing: Option<Vec<StaffRole>>,
}

/// Legacy spreadsheet numerics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericsDef {
    /// Round failure table cells to one decimal before summing
    #[serde(default)]
    pub round_weibull_cells: bool,
    /// Offset added before flooring cumulative failures
    #[serde(default = "default_drift_epsilon")]
    pub drift_epsilon: f64,
}

impl Default for NumericsDef {
    fn default() -> Self {
        Self {
            round_weibull_cells: false,
            drift_epsilon: DRIFT_EPSILON,
        }
    }
}

fn default_version() -> u32 {
    LATEST_VERSION
}

fn default_horizon() -> usize {
    PlantParams::default().years
}

fn default_rating() -> f64 {
    PlantParams::default().turbine_rating_kw
}

fn default_turbines() -> u32 {
    PlantParams::default().turbine_count
}

fn default_capacity_factor() -> f64 {
    PlantParams::default().capacity_factor
}

fn default_consumables() -> f64 {
    PlantParams::default().consumables_per_turbine
}

fn default_site_maintenance() -> f64 {
    PlantParams::default().site_maintenance
}

fn default_equipment() -> f64 {
    PlantParams::default().equipment
}

fn default_burden() -> f64 {
    PlantParams::default().burden
}

fn default_escalation() -> f64 {
    1.0
}

fn default_drift_epsilon() -> f64 {
    DRIFT_EPSILON
}

impl PlantConfig {
    /// Configuration for the baseline plant using `catalog`.
    pub fn baseline(name: impl Into<String>, catalog: impl Into<PathBuf>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            catalog: catalog.into(),
            crane_overrides: None,
            horizon_years: default_horizon(),
            turbine_rating_kw: default_rating(),
            turbine_count: default_turbines(),
            capacity_factor: default_capacity_factor(),
            consumables_per_turbine: default_consumables(),
            site_maintenance: default_site_maintenance(),
            equipment: default_equipment(),
            burden: default_burden(),
            labor_rate: None,
            escalation: default_escalation(),
            numerics: NumericsDef::default(),
            staffing: None,
        }
    }

    pub fn plant_params(&self) -> PlantParams {
        PlantParams {
            years: self.horizon_years,
            turbine_rating_kw: self.turbine_rating_kw,
            turbine_count: self.turbine_count,
            capacity_factor: self.capacity_factor,
            consumables_per_turbine: self.consumables_per_turbine,
            site_maintenance: self.site_maintenance,
            equipment: self.equipment,
            burden: self.burden,
        }
    }

    pub fn staffing_table(&self) -> StaffingTable {
        match &self.staffing {
            Some(roles) => StaffingTable {
                roles: roles.clone(),
            },
            None => StaffingTable::gec_default(self.horizon_years),
        }
    }

    pub fn account_options(&self) -> AccountOptions {
        AccountOptions {
            years: self.horizon_years,
            rounding: if self.numerics.round_weibull_cells {
                CellRounding::Tenths
            } else {
                CellRounding::Exact
            },
            drift_epsilon: self.numerics.drift_epsilon,
            escalation: self.escalation,
        }
    }

    /// Explicit labor rate, or the rate derived from technician wages.
    pub fn labor_rate(&self) -> ProjectResult<f64> {
        if let Some(rate) = self.labor_rate {
            return Ok(rate);
        }
        self.staffing_table()
            .technician_labor_rate(self.burden)
            .ok_or_else(|| {
                ProjectError::Validation(ValidationError::InvalidValue {
                    field: "labor_rate".to_string(),
                    value: "none".to_string(),
                    reason: "no labor rate given and staffing has no senior and junior technician"
                        .to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_takes_baseline_defaults() {
        let config: PlantConfig =
            serde_yaml::from_str("name: Test\ncatalog: parts.csv\n").unwrap();
        assert_eq!(config, PlantConfig::baseline("Test", "parts.csv"));
        assert_eq!(config.plant_params(), PlantParams::default());
        assert_eq!(config.account_options(), AccountOptions::default());
    }

    #[test]
    fn labor_rate_derives_from_technicians() {
        let config = PlantConfig::baseline("Test", "parts.csv");
        let rate = config.labor_rate().unwrap();
        assert!((rate - 14.0 * 1.35).abs() < 1e-12);

        let explicit = PlantConfig {
            labor_rate: Some(50.0),
            ..config
        };
        assert_eq!(explicit.labor_rate().unwrap(), 50.0);
    }

    #[test]
    fn rounding_flag_maps_to_cell_rounding() {
        let config: PlantConfig = serde_yaml::from_str(
            "name: Test\ncatalog: parts.csv\nnumerics:\n  round_weibull_cells: true\n",
        )
        .unwrap();
        assert_eq!(config.account_options().rounding, CellRounding::Tenths);
        assert_eq!(config.account_options().drift_epsilon, DRIFT_EPSILON);
    }
}
