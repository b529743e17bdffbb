//! Component fan-out and plant ledger fan-in.

use std::collections::BTreeMap;

use om_components::{AccountOptions, ComponentCostAccount, ComponentSpec};
use rayon::prelude::*;

use crate::error::{PlantError, PlantResult};
use crate::ledger::PlantLedger;
use crate::params::PlantParams;
use crate::staffing::{RoleClass, StaffingTable};

/// How component accounts are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// One rayon task per component
    #[default]
    Parallel,
    Sequential,
}

/// Compute every component account in parallel. Output order matches `specs`.
pub fn compute_accounts(
    specs: Vec<ComponentSpec>,
    options: &AccountOptions,
) -> PlantResult<Vec<ComponentCostAccount>> {
    compute_accounts_with(specs, options, Execution::Parallel)
}

pub fn compute_accounts_with(
    specs: Vec<ComponentSpec>,
    options: &AccountOptions,
    execution: Execution,
) -> PlantResult<Vec<ComponentCostAccount>> {
    let accounts: Result<Vec<_>, _> = match execution {
        Execution::Parallel => specs
            .into_par_iter()
            .map(|spec| ComponentCostAccount::compute(spec, options))
            .collect(),
        Execution::Sequential => specs
            .into_iter()
            .map(|spec| ComponentCostAccount::compute(spec, options))
            .collect(),
    };
    Ok(accounts?)
}

/// Build the plant ledger from finished component accounts.
///
/// # Errors
/// Returns error if plant parameters or staffing are invalid, or an account
/// was computed for a different horizon.
pub fn aggregate(
    params: &PlantParams,
    staffing: &StaffingTable,
    accounts: &[ComponentCostAccount],
) -> PlantResult<PlantLedger> {
    params.validate()?;
    staffing.validate(params.years)?;
    let years = params.years;

    let mut parts = vec![0.0; years];
    let mut system_parts: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for account in accounts {
        let cost = &account.ledger().cost;
        if cost.len() != years {
            return Err(PlantError::HorizonMismatch {
                component: account.spec().key.to_string(),
                len: cost.len(),
                years,
            });
        }
        let per_system = system_parts
            .entry(account.spec().key.system.clone())
            .or_insert_with(|| vec![0.0; years]);
        for y in 0..years {
            parts[y] += cost[y];
            per_system[y] += cost[y];
        }
    }

    let consumables = vec![params.consumables_per_year(); years];
    let salaried = staffing.labor_series(RoleClass::Salaried, params.burden, years);
    let wages = staffing.labor_series(RoleClass::Hourly, params.burden, years);
    let site_maintenance = vec![params.site_maintenance; years];
    let equipment = vec![params.equipment; years];

    tracing::info!(
        components = accounts.len(),
        systems = system_parts.len(),
        years,
        "plant ledger aggregated"
    );

    Ok(PlantLedger::new(
        years,
        params.turbine_count,
        params.turbine_rating_kw,
        params.capacity_factor,
        [
            parts,
            consumables,
            salaried,
            wages,
            site_maintenance,
            equipment,
        ],
        system_parts,
    ))
}
