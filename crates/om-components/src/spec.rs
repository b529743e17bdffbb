//! Catalog description of a replaceable part.

use om_core::ComponentKey;
use serde::{Deserialize, Serialize};

/// Crane cost applied to crane-required repairs when the catalog gives none (USD).
pub const DEFAULT_CRANE_COST: f64 = 60_000.0;

/// Failure-prediction tag as written in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PredictionTag {
    Weibull,
    ConstantRate,
    Unspecified,
    Unknown { tag: String },
}

impl PredictionTag {
    /// Parse a catalog tag: anything starting with `Weib` or `Const`.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() {
            PredictionTag::Unspecified
        } else if tag.starts_with("Weib") {
            PredictionTag::Weibull
        } else if tag.starts_with("Const") {
            PredictionTag::ConstantRate
        } else {
            PredictionTag::Unknown {
                tag: tag.to_string(),
            }
        }
    }
}

/// One part type across the whole plant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub key: ComponentKey,
    pub prediction: PredictionTag,
    /// Weibull shape `k`
    pub weibull_shape: Option<f64>,
    /// Weibull scale `c` (years)
    pub weibull_scale: Option<f64>,
    /// Share of the population failing over the whole horizon (%)
    pub fail_percent: Option<f64>,
    /// Units installed across the project (parts per turbine * turbines)
    pub population: u32,
    /// Unit part cost (USD)
    pub part_cost: f64,
    /// Labor hours per repair
    pub labor_hours: f64,
    /// Burdened labor rate (USD/hour)
    pub labor_rate: f64,
    pub crane: bool,
    /// Crane cost per repair (USD), charged only when `crane` is set
    pub crane_cost: f64,
}

impl ComponentSpec {
    /// Minimal Weibull-predicted part; remaining fields take legacy defaults
    /// (10 labor hours at $35/hour, $350 part, no crane).
    pub fn weibull(key: ComponentKey, shape: f64, scale: f64, population: u32) -> Self {
        Self {
            key,
            prediction: PredictionTag::Weibull,
            weibull_shape: Some(shape),
            weibull_scale: Some(scale),
            fail_percent: None,
            population,
            part_cost: 350.0,
            labor_hours: 10.0,
            labor_rate: 35.0,
            crane: false,
            crane_cost: 0.0,
        }
    }

    /// Minimal constant-rate part with the same legacy defaults.
    pub fn constant_rate(key: ComponentKey, fail_percent: f64, population: u32) -> Self {
        Self {
            prediction: PredictionTag::ConstantRate,
            weibull_shape: None,
            weibull_scale: None,
            fail_percent: Some(fail_percent),
            ..Self::weibull(key, 0.0, 0.0, population)
        }
    }

    /// Mark the part crane-required at the default crane cost.
    pub fn with_crane(mut self) -> Self {
        self.crane = true;
        self.crane_cost = DEFAULT_CRANE_COST;
        self
    }

    /// Labor + part + crane cost of one repair event.
    pub fn cost_per_event(&self) -> f64 {
        let mut cost = self.labor_hours * self.labor_rate + self.part_cost;
        if self.crane {
            cost += self.crane_cost;
        }
        cost
    }

    /// Patch in a catalog crane override. The repair now needs a crane at
    /// `crane_cost`.
    pub fn apply_crane_override(&mut self, crane_cost: f64) {
        self.crane = true;
        self.crane_cost = crane_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_tags() {
        assert_eq!(PredictionTag::parse("Weibull"), PredictionTag::Weibull);
        assert_eq!(PredictionTag::parse(" Weib"), PredictionTag::Weibull);
        assert_eq!(
            PredictionTag::parse("ConstantRate"),
            PredictionTag::ConstantRate
        );
        assert_eq!(PredictionTag::parse(""), PredictionTag::Unspecified);
        assert_eq!(
            PredictionTag::parse("MTBF"),
            PredictionTag::Unknown {
                tag: "MTBF".to_string()
            }
        );
    }

    #[test]
    fn cost_per_event_includes_crane_only_when_required() {
        let key = ComponentKey::new("Rotor", "Blade");
        let spec = ComponentSpec::weibull(key, 2.0, 10.0, 180);
        assert_eq!(spec.cost_per_event(), 10.0 * 35.0 + 350.0);

        let craned = spec.clone().with_crane();
        assert_eq!(
            craned.cost_per_event(),
            10.0 * 35.0 + 350.0 + DEFAULT_CRANE_COST
        );
    }

    #[test]
    fn crane_override_adds_exact_cost() {
        let key = ComponentKey::new("Drivetrain", "Gearbox");
        let mut spec = ComponentSpec::weibull(key, 2.0, 10.0, 60);
        let before = spec.cost_per_event();
        spec.apply_crane_override(125_000.0);
        assert_eq!(spec.cost_per_event() - before, 125_000.0);
    }
}
