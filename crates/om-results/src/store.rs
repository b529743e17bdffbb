//! Run storage API.
//!
//! Layout under the store root:
//!
//! ```text
//! <run id>/manifest.json
//! <run id>/ledger.json
//! <run id>/components.jsonl
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use om_plant::PlantLedger;

use crate::types::{ComponentRecord, RunManifest};
use crate::{ResultsError, ResultsResult};

const MANIFEST: &str = "manifest.json";
const LEDGER: &str = "ledger.json";
const COMPONENTS: &str = "components.jsonl";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a plant configuration: `<config dir>/.windom/runs`.
    pub fn for_config(config_path: &Path) -> ResultsResult<Self> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "config path has no parent directory".to_string(),
            })?;
        Self::new(config_dir.join(".windom").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        let dir = self.run_dir(run_id);
        dir.join(MANIFEST).exists() && dir.join(LEDGER).exists()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        ledger: &PlantLedger,
        components: &[ComponentRecord],
    ) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let mut content = String::new();
        for record in components {
            content.push_str(&serde_json::to_string(record)?);
            content.push('\n');
        }
        fs::write(run_dir.join(COMPONENTS), content)?;
        fs::write(run_dir.join(LEDGER), serde_json::to_string_pretty(ledger)?)?;
        // Written last: a run without a manifest is incomplete.
        fs::write(run_dir.join(MANIFEST), serde_json::to_string_pretty(manifest)?)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let content = self.read(run_id, MANIFEST)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_ledger(&self, run_id: &str) -> ResultsResult<PlantLedger> {
        let content = self.read(run_id, LEDGER)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_components(&self, run_id: &str) -> ResultsResult<Vec<ComponentRecord>> {
        let content = self.read(run_id, COMPONENTS)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                records.push(serde_json::from_str(line)?);
            }
        }
        Ok(records)
    }

    /// All complete runs, oldest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }

    fn read(&self, run_id: &str, file: &str) -> ResultsResult<String> {
        let path = self.run_dir(run_id).join(file);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(fs::read_to_string(path)?)
    }
}
