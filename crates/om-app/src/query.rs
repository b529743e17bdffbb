//! Query helpers over loaded plants and stored runs.

use om_components::ComponentCostAccount;
use om_core::ComponentKey;
use om_plant::{CostCategory, PlantLedger, UnitView};
use om_project::LoadedPlant;
use om_results::{ComponentRecord, RunManifest};

use crate::error::{AppError, AppResult};

/// Headline numbers of a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub years: usize,
    pub component_count: usize,
    pub total_events: u64,
    /// Total O&M cost over the horizon (USD)
    pub lifetime_cost: f64,
    /// Mean annual O&M cost (US cents per kWh)
    pub mean_cents_per_kwh: f64,
    pub diagnostic_count: usize,
}

pub fn get_run_summary(manifest: &RunManifest, ledger: &PlantLedger) -> AppResult<RunSummary> {
    let years = ledger.years();
    if years == 0 {
        return Err(AppError::InvalidInput("Ledger has no years".to_string()));
    }
    let lifetime_cost: f64 = ledger
        .view(UnitView::Project)
        .row(CostCategory::Total)
        .iter()
        .sum();
    let cents: f64 = ledger
        .view(UnitView::CentsPerKwh)
        .row(CostCategory::Total)
        .iter()
        .sum();

    Ok(RunSummary {
        years,
        component_count: manifest.component_count,
        total_events: manifest.total_events,
        lifetime_cost,
        mean_cents_per_kwh: cents / years as f64,
        diagnostic_count: manifest.diagnostics.len(),
    })
}

/// Compute the account of a single catalog part.
pub fn component_account(plant: &LoadedPlant, key: &ComponentKey) -> AppResult<ComponentCostAccount> {
    let spec = plant
        .catalog
        .get(key)
        .ok_or_else(|| AppError::ComponentNotFound(key.to_string()))?;
    Ok(ComponentCostAccount::compute(spec.clone(), &plant.options)?)
}

pub fn find_component_record<'a>(
    records: &'a [ComponentRecord],
    key: &ComponentKey,
) -> AppResult<&'a ComponentRecord> {
    records
        .iter()
        .find(|r| r.key == *key)
        .ok_or_else(|| AppError::ComponentNotFound(key.to_string()))
}

/// Parts replacement cost per system, converted to `view`.
pub fn system_parts_view(ledger: &PlantLedger, view: UnitView) -> Vec<(String, Vec<f64>)> {
    let divisor = ledger.divisor(view);
    ledger
        .system_parts()
        .iter()
        .map(|(system, series)| {
            (
                system.clone(),
                series.iter().map(|v| v / divisor).collect(),
            )
        })
        .collect()
}
