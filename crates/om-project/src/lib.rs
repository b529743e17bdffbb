//! om-project: plant configuration files and component catalogs.

pub mod catalog;
pub mod schema;
pub mod validate;

pub use catalog::{Catalog, CatalogContext, CraneOverride, apply_crane_overrides, parse_catalog};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

use std::path::{Path, PathBuf};

use om_components::AccountOptions;
use om_plant::{PlantParams, StaffingTable};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog line {line}: {message}")]
    CatalogRecord { line: u64, message: String },
}

/// A configuration with its catalog loaded and crane overrides applied.
#[derive(Debug, Clone)]
pub struct LoadedPlant {
    pub config: PlantConfig,
    pub config_path: PathBuf,
    pub params: PlantParams,
    pub staffing: StaffingTable,
    pub options: AccountOptions,
    pub catalog: Catalog,
    /// Raw catalog and override text, in load order
    pub catalog_sources: Vec<String>,
}

pub fn load_config(path: &Path) -> ProjectResult<PlantConfig> {
    let content = read(path)?;
    let config: PlantConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &PlantConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a configuration and its catalog.
///
/// Every primary catalog record is loaded before any crane override is
/// applied, whether the overrides live in the catalog itself or in the
/// separate `crane_overrides` file.
pub fn load_plant(path: &Path) -> ProjectResult<LoadedPlant> {
    let config = load_config(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let params = config.plant_params();
    let staffing = config.staffing_table();
    let labor_rate = config.labor_rate()?;
    let context = CatalogContext {
        turbine_count: params.turbine_count,
        labor_rate,
    };

    let catalog_path = base_dir.join(&config.catalog);
    let catalog_text = read(&catalog_path)?;
    let mut sources = vec![catalog_text];
    let (mut catalog, mut overrides) = parse_catalog(sources[0].as_bytes(), &context)?;

    if let Some(extra) = &config.crane_overrides {
        let text = read(&base_dir.join(extra))?;
        let (extra_catalog, extra_overrides) = parse_catalog(text.as_bytes(), &context)?;
        if !extra_catalog.specs().is_empty() {
            return Err(ProjectError::CatalogRecord {
                line: 0,
                message: format!(
                    "crane override file {} contains component records",
                    extra.display()
                ),
            });
        }
        overrides.extend(extra_overrides);
        sources.push(text);
    }

    apply_crane_overrides(&mut catalog, &overrides);
    tracing::info!(
        components = catalog.specs().len(),
        overrides = overrides.len(),
        diagnostics = catalog.diagnostics().len(),
        "catalog loaded"
    );

    Ok(LoadedPlant {
        options: config.account_options(),
        config,
        config_path: path.to_path_buf(),
        params,
        staffing,
        catalog,
        catalog_sources: sources,
    })
}

fn read(path: &Path) -> ProjectResult<String> {
    std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_path_buf(),
        source,
    })
}
