use std::path::{Path, PathBuf};

use om_core::ComponentKey;

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/gec")
        .join(name)
}

#[test]
fn demos_load_and_validate() {
    for name in ["plant.yaml", "legacy.yaml"] {
        let plant = om_project::load_plant(&demo(name))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        assert_eq!(plant.catalog.specs().len(), 20);
        assert!(plant.catalog.diagnostics().is_empty());
        assert_eq!(plant.catalog_sources.len(), 2);
    }
}

#[test]
fn override_file_patches_crane_costs() {
    let plant = om_project::load_plant(&demo("plant.yaml")).unwrap();

    let gearbox = plant
        .catalog
        .get(&ComponentKey::new("Drivetrain", "Gearbox"))
        .unwrap();
    assert!(gearbox.crane);
    assert_eq!(gearbox.crane_cost, 125_000.0);

    let blade = plant
        .catalog
        .get(&ComponentKey::new("Rotor", "Blade"))
        .unwrap();
    assert_eq!(blade.crane_cost, 90_000.0);

    let generator = plant
        .catalog
        .get(&ComponentKey::new("Electrical", "Generator"))
        .unwrap();
    assert_eq!(generator.crane_cost, om_components::DEFAULT_CRANE_COST);
}

#[test]
fn labor_rate_and_population_follow_plant() {
    let plant = om_project::load_plant(&demo("plant.yaml")).unwrap();
    let yaw = plant
        .catalog
        .get(&ComponentKey::new("Nacelle", "Yaw drive"))
        .unwrap();
    assert_eq!(yaw.population, 4 * 60);
    assert!((yaw.labor_rate - 14.0 * 1.35).abs() < 1e-12);
}

#[test]
fn legacy_config_selects_tenths_rounding() {
    let plant = om_project::load_plant(&demo("legacy.yaml")).unwrap();
    assert_eq!(plant.options.rounding, om_components::CellRounding::Tenths);
    assert_eq!(plant.options.years, 20);
}
