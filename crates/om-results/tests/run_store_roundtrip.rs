use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use om_components::{AccountOptions, ComponentSpec};
use om_core::ComponentKey;
use om_plant::{CostCategory, PlantParams, StaffingTable, UnitView, aggregate, compute_accounts};
use om_results::{ComponentRecord, ResultsError, RunManifest, RunStore};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(run_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        plant_name: "Test plant".to_string(),
        timestamp: timestamp.to_string(),
        engine_version: "0.1.0".to_string(),
        horizon_years: 20,
        component_count: 2,
        total_events: 0,
        diagnostics: Vec::new(),
    }
}

#[test]
fn save_list_load_roundtrip() {
    let plant_dir = unique_temp_dir("om_results_plant");
    fs::create_dir_all(&plant_dir).expect("failed to create temp plant dir");
    let config_path = plant_dir.join("plant.yaml");
    fs::write(&config_path, "name: test\ncatalog: parts.csv\n").expect("failed to write config");

    let store = RunStore::for_config(&config_path).expect("failed to create run store");
    assert!(store.root_dir().ends_with(".windom/runs"));

    let params = PlantParams::default();
    let specs = vec![
        ComponentSpec::weibull(ComponentKey::new("Rotor", "Blade"), 2.5, 30.0, 180).with_crane(),
        ComponentSpec::constant_rate(ComponentKey::new("Nacelle", "Anemometer"), 40.0, 60),
    ];
    let accounts = compute_accounts(specs, &AccountOptions::default()).unwrap();
    let ledger = aggregate(&params, &StaffingTable::gec_default(20), &accounts).unwrap();
    let records: Vec<ComponentRecord> = accounts.iter().map(ComponentRecord::from).collect();

    store
        .save_run(&manifest("run-b", "2026-03-02T00:00:00Z"), &ledger, &records)
        .expect("failed to save run");
    store
        .save_run(&manifest("run-a", "2026-03-01T00:00:00Z"), &ledger, &records)
        .expect("failed to save run");

    let runs = store.list_runs().expect("failed to list runs");
    let ids: Vec<_> = runs.iter().map(|m| m.run_id.as_str()).collect();
    assert_eq!(ids, ["run-a", "run-b"]);
    assert!(store.has_run("run-a"));

    let loaded = store.load_ledger("run-a").expect("failed to load ledger");
    assert_eq!(loaded.years(), ledger.years());
    let before = ledger.view(UnitView::PerKw);
    let after = loaded.view(UnitView::PerKw);
    for category in CostCategory::ALL {
        for (a, b) in before.row(category).iter().zip(after.row(category)) {
            assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0));
        }
    }

    let components = store.load_components("run-a").expect("failed to load components");
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].key, ComponentKey::new("Rotor", "Blade"));
    assert_eq!(components[0].ledger.events, accounts[0].ledger().events);
    assert_eq!(components[0].ledger.total_events, accounts[0].total_events());
    assert!(components[0].median_life.is_some());
    assert!(components[1].median_life.is_none());
}

#[test]
fn missing_run_is_reported() {
    let store = RunStore::new(unique_temp_dir("om_results_missing")).unwrap();
    assert!(!store.has_run("nope"));
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn delete_removes_run() {
    let store = RunStore::new(unique_temp_dir("om_results_delete")).unwrap();
    let accounts = compute_accounts(Vec::new(), &AccountOptions::default()).unwrap();
    let ledger = aggregate(&PlantParams::default(), &StaffingTable::gec_default(20), &accounts).unwrap();
    store
        .save_run(&manifest("gone", "2026-03-01T00:00:00Z"), &ledger, &[])
        .unwrap();
    assert!(store.has_run("gone"));
    store.delete_run("gone").unwrap();
    assert!(!store.has_run("gone"));
    assert!(store.list_runs().unwrap().is_empty());
}
