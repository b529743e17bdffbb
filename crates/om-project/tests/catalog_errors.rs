use std::path::PathBuf;

use om_project::{PlantConfig, ProjectError};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("om_project_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_plant(dir: &PathBuf, catalog: &str) -> PathBuf {
    std::fs::write(dir.join("parts.csv"), catalog).unwrap();
    let config_path = dir.join("plant.yaml");
    om_project::save_config(&config_path, &PlantConfig::baseline("Scratch", "parts.csv")).unwrap();
    config_path
}

#[test]
fn malformed_record_fails_load_with_line() {
    let dir = scratch("malformed");
    let path = write_plant(
        &dir,
        "Rotor,Blade,Weibull,,30,2.5,,3,95000,48,TRUE\n\
         Rotor,Hub,Weibull,,60,3,,one,45000,40,TRUE\n",
    );
    match om_project::load_plant(&path) {
        Err(ProjectError::CatalogRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected catalog record error, got {other:?}"),
    }
}

#[test]
fn inline_override_before_its_record_still_applies() {
    let dir = scratch("inline_override");
    let path = write_plant(
        &dir,
        "CRANE,Rotor,Hub,70000\n\
         Rotor,Hub,Weibull,,60,3,,1,45000,40,FALSE\n\
         CRANE,Rotor,Spinner,1000\n",
    );
    let plant = om_project::load_plant(&path).unwrap();
    let hub = &plant.catalog.specs()[0];
    assert!(hub.crane);
    assert_eq!(hub.crane_cost, 70_000.0);
    assert_eq!(plant.catalog.diagnostics().len(), 1);
}

#[test]
fn degraded_parts_still_load() {
    let dir = scratch("degraded");
    let path = write_plant(
        &dir,
        "Rotor,Hub,Weibull,,,3,,1,45000,40,FALSE\n\
         Rotor,Spinner,,,,,,1,500,2,FALSE\n",
    );
    let plant = om_project::load_plant(&path).unwrap();
    assert_eq!(plant.catalog.specs().len(), 2);
    assert!(plant.catalog.diagnostics().is_empty());
}

#[test]
fn missing_catalog_reports_path() {
    let dir = scratch("missing");
    let config_path = dir.join("plant.yaml");
    om_project::save_config(&config_path, &PlantConfig::baseline("Scratch", "absent.csv")).unwrap();
    match om_project::load_plant(&config_path) {
        Err(ProjectError::Read { path, .. }) => assert!(path.ends_with("absent.csv")),
        other => panic!("expected read error, got {other:?}"),
    }
}
