//! Plant loading, validation, and introspection.

use std::collections::BTreeMap;
use std::path::Path;

use om_components::{ComponentSpec, ConfigurationError, FailureModel};
use om_project::{LoadedPlant, PlantConfig};

use crate::error::AppResult;

/// Summary of a plant system for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSummary {
    pub name: String,
    pub component_count: usize,
    pub crane_count: usize,
}

/// Result of checking a plant configuration and its catalog.
#[derive(Debug, Clone)]
pub struct PlantReport {
    pub name: String,
    pub horizon_years: usize,
    pub component_count: usize,
    pub systems: Vec<SystemSummary>,
    /// Catalog problems followed by failure-model problems, in catalog order
    pub diagnostics: Vec<ConfigurationError>,
}

/// Load a plant configuration with its catalog.
pub fn load_plant(path: &Path) -> AppResult<LoadedPlant> {
    Ok(om_project::load_plant(path)?)
}

/// Save a plant configuration to a YAML file.
pub fn save_config(path: &Path, config: &PlantConfig) -> AppResult<()> {
    Ok(om_project::save_config(path, config)?)
}

/// Load a plant and collect every recoverable problem without running it.
pub fn validate_plant(path: &Path) -> AppResult<PlantReport> {
    let plant = load_plant(path)?;
    let mut diagnostics = plant.catalog.diagnostics().to_vec();
    for spec in plant.catalog.specs() {
        let (_, issue) = FailureModel::resolve(spec);
        diagnostics.extend(issue);
    }
    for diagnostic in &diagnostics {
        tracing::warn!("{diagnostic}");
    }

    Ok(PlantReport {
        name: plant.config.name.clone(),
        horizon_years: plant.params.years,
        component_count: plant.catalog.specs().len(),
        systems: list_systems(plant.catalog.specs()),
        diagnostics,
    })
}

/// Systems in name order with their part counts.
pub fn list_systems(specs: &[ComponentSpec]) -> Vec<SystemSummary> {
    let mut systems: BTreeMap<&str, SystemSummary> = BTreeMap::new();
    for spec in specs {
        let summary = systems
            .entry(spec.key.system.as_str())
            .or_insert_with(|| SystemSummary {
                name: spec.key.system.clone(),
                component_count: 0,
                crane_count: 0,
            });
        summary.component_count += 1;
        if spec.crane {
            summary.crane_count += 1;
        }
    }
    systems.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use om_core::ComponentKey;

    #[test]
    fn systems_are_grouped_and_sorted() {
        let specs = vec![
            ComponentSpec::weibull(ComponentKey::new("Rotor", "Blade"), 2.5, 30.0, 180).with_crane(),
            ComponentSpec::weibull(ComponentKey::new("Drivetrain", "Gearbox"), 2.6, 14.0, 60),
            ComponentSpec::constant_rate(ComponentKey::new("Rotor", "Pitch controller"), 15.0, 60),
        ];
        let systems = list_systems(&specs);
        assert_eq!(
            systems,
            vec![
                SystemSummary {
                    name: "Drivetrain".to_string(),
                    component_count: 1,
                    crane_count: 0,
                },
                SystemSummary {
                    name: "Rotor".to_string(),
                    component_count: 2,
                    crane_count: 1,
                },
            ]
        );
    }
}
