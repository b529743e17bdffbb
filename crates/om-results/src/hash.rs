//! Content-based hashing for run IDs.

use om_project::PlantConfig;
use sha2::{Digest, Sha256};

/// Run ID over everything that determines an estimate: catalog text, the
/// plant configuration and the engine version.
///
/// File paths inside the configuration are hashed as written, so moving a
/// plant directory keeps its cached runs.
pub fn compute_run_id(
    catalog_sources: &[String],
    config: &PlantConfig,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    for source in catalog_sources {
        hasher.update(source.as_bytes());
        hasher.update([0u8]);
    }

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
