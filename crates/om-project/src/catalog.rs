//! Component catalog loading.
//!
//! A catalog is a positional CSV export of the component sheet. Primary
//! records describe one part type each; `CRANE` records patch the crane
//! cost of a part loaded elsewhere in the catalog.

use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;
use om_components::{ComponentSpec, ConfigurationError, PredictionTag};
use om_core::ComponentKey;

use crate::{ProjectError, ProjectResult};

const COL_SYSTEM: usize = 0;
const COL_COMPONENT: usize = 1;
const COL_PREDICTION: usize = 2;
const COL_FAIL_PERCENT: usize = 3;
const COL_WEIBULL_SCALE: usize = 4;
const COL_WEIBULL_SHAPE: usize = 5;
const COL_PARTS_PER_TURBINE: usize = 7;
const COL_PART_COST: usize = 8;
const COL_LABOR_HOURS: usize = 9;
const COL_CRANE: usize = 10;

const OVERRIDE_TAG: &str = "CRANE";
const HEADER_TAG: &str = "System";

/// Plant values every catalog record depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogContext {
    pub turbine_count: u32,
    /// Burdened repair labor rate (USD/hour)
    pub labor_rate: f64,
}

/// A pending `CRANE` record.
#[derive(Debug, Clone, PartialEq)]
pub struct CraneOverride {
    pub key: ComponentKey,
    pub crane_cost: f64,
    /// Source line, for diagnostics
    pub line: u64,
}

/// Loaded component specs in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    specs: Vec<ComponentSpec>,
    index: HashMap<ComponentKey, usize>,
    diagnostics: Vec<ConfigurationError>,
}

impl Catalog {
    pub fn specs(&self) -> &[ComponentSpec] {
        &self.specs
    }

    pub fn into_specs(self) -> Vec<ComponentSpec> {
        self.specs
    }

    pub fn get(&self, key: &ComponentKey) -> Option<&ComponentSpec> {
        self.index.get(key).map(|&i| &self.specs[i])
    }

    /// Problems found while loading. None of them stop the load.
    pub fn diagnostics(&self) -> &[ConfigurationError] {
        &self.diagnostics
    }

    /// Add a spec. A second spec under an existing key is dropped.
    pub fn insert(&mut self, spec: ComponentSpec) -> bool {
        if self.index.contains_key(&spec.key) {
            tracing::warn!(key = %spec.key, "duplicate catalog component ignored");
            self.diagnostics
                .push(ConfigurationError::DuplicateComponent { key: spec.key });
            return false;
        }
        self.index.insert(spec.key.clone(), self.specs.len());
        self.specs.push(spec);
        true
    }

    fn get_mut(&mut self, key: &ComponentKey) -> Option<&mut ComponentSpec> {
        match self.index.get(key) {
            Some(&i) => self.specs.get_mut(i),
            None => None,
        }
    }
}

/// Parse a catalog. Crane overrides are returned unapplied so that every
/// primary record is in place before any of them runs.
///
/// # Errors
/// Malformed CSV, an unparseable required number, or an unrecognized crane
/// flag fails the whole load.
pub fn parse_catalog<R: Read>(
    reader: R,
    context: &CatalogContext,
) -> ProjectResult<(Catalog, Vec<CraneOverride>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut catalog = Catalog::default();
    let mut overrides = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let first = field(&record, COL_SYSTEM);
        if first.is_empty() || first.starts_with('#') || first == HEADER_TAG {
            continue;
        }
        if first == OVERRIDE_TAG {
            overrides.push(parse_override(&record, line)?);
            continue;
        }
        let spec = parse_component(&record, line, context)?;
        catalog.insert(spec);
    }

    Ok((catalog, overrides))
}

/// Patch crane costs in catalog order of the override records. Overrides
/// naming an unknown part become diagnostics.
pub fn apply_crane_overrides(catalog: &mut Catalog, overrides: &[CraneOverride]) {
    for o in overrides {
        match catalog.get_mut(&o.key) {
            Some(spec) => {
                tracing::debug!(key = %o.key, cost = o.crane_cost, "crane override applied");
                spec.apply_crane_override(o.crane_cost);
            }
            None => {
                tracing::warn!(key = %o.key, line = o.line, "crane override for unknown component");
                catalog
                    .diagnostics
                    .push(ConfigurationError::UnknownOverrideTarget { key: o.key.clone() });
            }
        }
    }
}

fn parse_override(record: &StringRecord, line: u64) -> ProjectResult<CraneOverride> {
    let key = ComponentKey::new(field(record, 1), field(record, 2));
    let crane_cost = required_f64(record, 3, "crane cost", line)?;
    if crane_cost < 0.0 {
        return Err(record_error(line, format!("negative crane cost {crane_cost}")));
    }
    Ok(CraneOverride {
        key,
        crane_cost,
        line,
    })
}

fn parse_component(
    record: &StringRecord,
    line: u64,
    context: &CatalogContext,
) -> ProjectResult<ComponentSpec> {
    let key = ComponentKey::new(field(record, COL_SYSTEM), field(record, COL_COMPONENT));
    if key.component.is_empty() {
        return Err(record_error(line, "missing component name".to_string()));
    }

    let per_turbine = field(record, COL_PARTS_PER_TURBINE);
    let per_turbine: u32 = per_turbine.parse().map_err(|_| {
        record_error(
            line,
            format!("parts per turbine '{per_turbine}' is not a whole number"),
        )
    })?;
    let population = per_turbine.checked_mul(context.turbine_count).ok_or_else(|| {
        record_error(line, "population overflows".to_string())
    })?;

    let crane = parse_crane_flag(field(record, COL_CRANE))
        .ok_or_else(|| {
            record_error(
                line,
                format!("unrecognized crane flag '{}'", field(record, COL_CRANE)),
            )
        })?;

    let mut spec = ComponentSpec {
        key,
        prediction: PredictionTag::parse(field(record, COL_PREDICTION)),
        weibull_shape: optional_f64(record, COL_WEIBULL_SHAPE),
        weibull_scale: optional_f64(record, COL_WEIBULL_SCALE),
        fail_percent: optional_f64(record, COL_FAIL_PERCENT),
        population,
        part_cost: required_f64(record, COL_PART_COST, "part cost", line)?.max(0.0),
        labor_hours: required_f64(record, COL_LABOR_HOURS, "labor hours", line)?,
        labor_rate: context.labor_rate,
        crane: false,
        crane_cost: 0.0,
    };
    if spec.labor_hours < 0.0 {
        return Err(record_error(
            line,
            format!("negative labor hours {}", spec.labor_hours),
        ));
    }
    if crane {
        spec = spec.with_crane();
    }
    Ok(spec)
}

fn parse_crane_flag(flag: &str) -> Option<bool> {
    match flag {
        "" | "FALSE" | "False" | "false" | "f" => Some(false),
        "TRUE" | "True" | "true" | "t" => Some(true),
        _ => None,
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn optional_f64(record: &StringRecord, index: usize) -> Option<f64> {
    let text = field(record, index);
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn required_f64(record: &StringRecord, index: usize, what: &str, line: u64) -> ProjectResult<f64> {
    let text = field(record, index);
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| record_error(line, format!("{what} '{text}' is not a number")))
}

fn record_error(line: u64, message: String) -> ProjectError {
    ProjectError::CatalogRecord { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: CatalogContext = CatalogContext {
        turbine_count: 60,
        labor_rate: 18.9,
    };

    fn parse(text: &str) -> (Catalog, Vec<CraneOverride>) {
        parse_catalog(text.as_bytes(), &CONTEXT).unwrap()
    }

    #[test]
    fn skips_header_comments_and_blank_rows() {
        let (catalog, overrides) = parse(
            "System,Component,FailPred,Rate,WeibA,WeibB,Mlife,NperTurb,Cost,Labor,Crane\n\
             # rotor parts\n\
             ,,,,,,,,,,\n\
             Rotor,Pitch gear,Weibull,,10,2,,3,1200,8,FALSE\n",
        );
        assert!(overrides.is_empty());
        assert_eq!(catalog.specs().len(), 1);
        let spec = &catalog.specs()[0];
        assert_eq!(spec.key, ComponentKey::new("Rotor", "Pitch gear"));
        assert_eq!(spec.prediction, PredictionTag::Weibull);
        assert_eq!(spec.weibull_scale, Some(10.0));
        assert_eq!(spec.weibull_shape, Some(2.0));
        assert_eq!(spec.population, 180);
        assert_eq!(spec.labor_rate, 18.9);
        assert!(!spec.crane);
    }

    #[test]
    fn crane_flag_spellings() {
        for flag in ["TRUE", "True", "true", "t"] {
            assert_eq!(parse_crane_flag(flag), Some(true));
        }
        for flag in ["FALSE", "False", "false", "f", ""] {
            assert_eq!(parse_crane_flag(flag), Some(false));
        }
        assert_eq!(parse_crane_flag("yes"), None);
    }

    #[test]
    fn crane_required_part_gets_default_cost() {
        let (catalog, _) = parse("Drivetrain,Gearbox,Weibull,,12,3,,1,250000,40,TRUE\n");
        let spec = &catalog.specs()[0];
        assert!(spec.crane);
        assert_eq!(spec.crane_cost, om_components::DEFAULT_CRANE_COST);
    }

    #[test]
    fn negative_part_cost_is_clamped() {
        let (catalog, _) = parse("Rotor,Hub,Const,5,,,,1,-20,4,f\n");
        assert_eq!(catalog.specs()[0].part_cost, 0.0);
        assert_eq!(catalog.specs()[0].fail_percent, Some(5.0));
    }

    #[test]
    fn unknown_crane_flag_fails_load() {
        let err = parse_catalog(
            "Rotor,Hub,Const,5,,,,1,20,4,maybe\n".as_bytes(),
            &CONTEXT,
        )
        .unwrap_err();
        assert!(matches!(err, ProjectError::CatalogRecord { line: 1, .. }));
    }

    #[test]
    fn duplicate_keeps_first() {
        let (catalog, _) = parse(
            "Rotor,Hub,Const,5,,,,1,20,4,f\n\
             Rotor,Hub,Const,9,,,,1,20,4,f\n",
        );
        assert_eq!(catalog.specs().len(), 1);
        assert_eq!(catalog.specs()[0].fail_percent, Some(5.0));
        assert!(matches!(
            catalog.diagnostics(),
            [ConfigurationError::DuplicateComponent { .. }]
        ));
    }

    #[test]
    fn overrides_apply_after_all_records() {
        let (mut catalog, overrides) = parse(
            "CRANE,Drivetrain,Gearbox,125000\n\
             Drivetrain,Gearbox,Weibull,,12,3,,1,250000,40,FALSE\n\
             CRANE,Nacelle,Yaw drive,5000\n",
        );
        assert_eq!(overrides.len(), 2);
        apply_crane_overrides(&mut catalog, &overrides);

        let gearbox = catalog
            .get(&ComponentKey::new("Drivetrain", "Gearbox"))
            .unwrap();
        assert!(gearbox.crane);
        assert_eq!(gearbox.crane_cost, 125_000.0);
        assert!(matches!(
            catalog.diagnostics(),
            [ConfigurationError::UnknownOverrideTarget { .. }]
        ));
    }
}
