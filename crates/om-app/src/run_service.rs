//! Estimate execution and caching service.

use std::path::Path;
use std::time::Instant;

use om_components::ConfigurationError;
use om_plant::{Execution, PlantLedger};
use om_results::{ComponentRecord, RunManifest, RunStore};

use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};
use crate::project_service;

/// Version stamped into run manifests and hashed into run IDs.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running estimates.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
    pub execution: Execution,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
            execution: Execution::Parallel,
        }
    }
}

/// Request to execute an estimate.
pub struct RunRequest<'a> {
    pub config_path: &'a Path,
    pub options: RunOptions,
}

/// Wall-clock timing of one request.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub load_time_s: f64,
    pub compute_time_s: f64,
    pub aggregate_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// A persisted run, fully loaded.
#[derive(Debug, Clone)]
pub struct StoredRun {
    pub manifest: RunManifest,
    pub ledger: PlantLedger,
    pub components: Vec<ComponentRecord>,
}

/// Response from an estimate request.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub run: StoredRun,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: &str,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            Some(message.to_string()),
        ));
    }
}

/// Execute or load an estimate.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load an estimate, reporting each stage.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(&mut progress_cb, RunStage::LoadingPlant, started, "Loading plant");
    let stage_started = Instant::now();
    let plant = project_service::load_plant(request.config_path)?;
    timing.load_time_s = stage_started.elapsed().as_secs_f64();

    emit_progress(&mut progress_cb, RunStage::CheckingCache, started, "Checking run cache");
    let run_id = om_results::compute_run_id(
        &plant.catalog_sources,
        &plant.config,
        &request.options.engine_version,
    );
    let store = RunStore::for_config(request.config_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            "Loading cached run",
        );
        let load_started = Instant::now();
        let run = read_run(&store, &run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();
        tracing::info!(run_id = %run_id, "estimate loaded from cache");

        emit_progress(&mut progress_cb, RunStage::Completed, started, "Loaded cached run");
        return Ok(RunResponse {
            run_id,
            run,
            loaded_from_cache: true,
            timing,
        });
    }

    emit_progress(
        &mut progress_cb,
        RunStage::ComputingAccounts,
        started,
        "Computing component accounts",
    );
    let stage_started = Instant::now();
    let mut diagnostics: Vec<ConfigurationError> = plant.catalog.diagnostics().to_vec();
    let specs = plant.catalog.into_specs();
    let accounts =
        om_plant::compute_accounts_with(specs, &plant.options, request.options.execution)?;
    for account in &accounts {
        diagnostics.extend_from_slice(account.diagnostics());
    }
    timing.compute_time_s = stage_started.elapsed().as_secs_f64();

    emit_progress(&mut progress_cb, RunStage::Aggregating, started, "Aggregating plant ledger");
    let stage_started = Instant::now();
    let ledger = om_plant::aggregate(&plant.params, &plant.staffing, &accounts)?;
    timing.aggregate_time_s = stage_started.elapsed().as_secs_f64();

    emit_progress(&mut progress_cb, RunStage::SavingResults, started, "Saving results");
    let stage_started = Instant::now();
    let components: Vec<ComponentRecord> = accounts.iter().map(ComponentRecord::from).collect();
    let manifest = RunManifest {
        run_id: run_id.clone(),
        plant_name: plant.config.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        engine_version: request.options.engine_version.clone(),
        horizon_years: plant.params.years,
        component_count: components.len(),
        total_events: accounts.iter().map(|a| a.total_events()).sum(),
        diagnostics,
    };
    store.save_run(&manifest, &ledger, &components)?;
    timing.save_time_s = stage_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    tracing::info!(
        run_id = %run_id,
        components = manifest.component_count,
        total_events = manifest.total_events,
        elapsed_s = timing.total_time_s,
        "estimate completed"
    );
    emit_progress(&mut progress_cb, RunStage::Completed, started, "Run completed");

    Ok(RunResponse {
        run_id,
        run: StoredRun {
            manifest,
            ledger,
            components,
        },
        loaded_from_cache: false,
        timing,
    })
}

/// List stored runs for a plant configuration, oldest first.
pub fn list_runs(config_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_config(config_path)?;
    Ok(store.list_runs()?)
}

/// Load a stored run by ID.
pub fn load_run(config_path: &Path, run_id: &str) -> AppResult<StoredRun> {
    let store = RunStore::for_config(config_path)?;
    read_run(&store, run_id)
}

fn read_run(store: &RunStore, run_id: &str) -> AppResult<StoredRun> {
    Ok(StoredRun {
        manifest: store.load_manifest(run_id)?,
        ledger: store.load_ledger(run_id)?,
        components: store.load_components(run_id)?,
    })
}
