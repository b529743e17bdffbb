//! Shared application service layer for the O&M cost model.
//!
//! Front ends go through this crate for loading plants, running and
//! caching estimates, and querying stored runs.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use project_service::{
    PlantReport, SystemSummary, list_systems, load_plant, save_config, validate_plant,
};
pub use query::{
    RunSummary, component_account, find_component_record, get_run_summary, system_parts_view,
};
pub use om_results::{ComponentRecord, RunManifest};
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, RunTimingSummary, StoredRun, ensure_run,
    ensure_run_with_progress, list_runs, load_run,
};
