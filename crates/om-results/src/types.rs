//! Result data types.

use om_components::{ComponentCostAccount, ComponentLedger, ConfigurationError, FailureModel};
use om_core::ComponentKey;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub plant_name: String,
    pub timestamp: String,
    pub engine_version: String,
    pub horizon_years: usize,
    pub component_count: usize,
    pub total_events: u64,
    /// Recoverable catalog and model problems seen during the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ConfigurationError>,
}

/// One line of `components.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub key: ComponentKey,
    pub model: FailureModel,
    pub population: u32,
    pub crane: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_life: Option<f64>,
    pub ledger: ComponentLedger,
}

impl From<&ComponentCostAccount> for ComponentRecord {
    fn from(account: &ComponentCostAccount) -> Self {
        Self {
            key: account.spec().key.clone(),
            model: account.model(),
            population: account.spec().population,
            crane: account.spec().crane,
            median_life: account.median_life(),
            ledger: account.ledger().clone(),
        }
    }
}
