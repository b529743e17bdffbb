//! Year-by-year repair events and costs for one part type.

use std::fmt;

use om_core::{DRIFT_EPSILON, MAX_HORIZON_YEARS, ensure_finite, floor_with_drift};
use om_reliability::{CellRounding, FailureTable};
use serde::{Deserialize, Serialize};

use crate::diagnostic::ConfigurationError;
use crate::error::{ComponentError, ComponentResult};
use crate::model::FailureModel;
use crate::spec::ComponentSpec;

/// Read-only inputs shared by every account in a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountOptions {
    /// Project horizon (years)
    pub years: usize,
    /// Legacy one-decimal rounding of failure table cells
    pub rounding: CellRounding,
    /// Offset added before flooring cumulative failures
    pub drift_epsilon: f64,
    /// Cost escalation factor applied to every repair cost
    pub escalation: f64,
}

impl Default for AccountOptions {
    fn default() -> Self {
        Self {
            years: 20,
            rounding: CellRounding::Exact,
            drift_epsilon: DRIFT_EPSILON,
            escalation: 1.0,
        }
    }
}

impl AccountOptions {
    fn validate(&self) -> ComponentResult<()> {
        if self.years == 0 {
            return Err(ComponentError::InvalidArg {
                what: "horizon must be at least one year",
            });
        }
        if self.years > MAX_HORIZON_YEARS {
            return Err(ComponentError::InvalidArg {
                what: "horizon exceeds the longest supported projection",
            });
        }
        if !self.drift_epsilon.is_finite() || self.drift_epsilon < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "drift epsilon must be finite and non-negative",
            });
        }
        if !self.escalation.is_finite() || self.escalation < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "escalation must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// Per-year arrays for one part type. All arrays have `years` entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentLedger {
    /// Expected failures projected for the year
    pub projected: Vec<f64>,
    /// Running sum of `projected`
    pub cumulative: Vec<f64>,
    /// Whole repair events attributed to the year
    pub events: Vec<u64>,
    /// Repair cost for the year (USD)
    pub cost: Vec<f64>,
    pub total_events: u64,
    pub cost_per_event: f64,
}

/// Running sum of projected failures.
pub fn cumulative_failures(projected: &[f64]) -> Vec<f64> {
    let mut sum = 0.0;
    projected
        .iter()
        .map(|p| {
            sum += p;
            sum
        })
        .collect()
}

/// Whole events per year from cumulative expected failures.
///
/// ```text
/// events[0] = floor(cum[0])
/// events[y] = floor(cum[y] + eps) - floor(cum[y-1] + eps)
/// ```
///
/// The first year is floored without the offset, matching the legacy sheet.
pub fn whole_events(cumulative: &[f64], epsilon: f64) -> Vec<u64> {
    let mut events = Vec::with_capacity(cumulative.len());
    for (y, cum) in cumulative.iter().enumerate() {
        let whole = if y == 0 {
            cum.floor()
        } else {
            floor_with_drift(*cum, epsilon) - floor_with_drift(cumulative[y - 1], epsilon)
        };
        // Negative only if the input was not a running sum of non-negatives.
        events.push(whole.max(0.0) as u64);
    }
    events
}

/// Cost account for one catalog part.
///
/// Built once from its spec and the run options; never mutated. A crane
/// override produces a new account via [`ComponentCostAccount::with_crane_override`].
#[derive(Clone, Debug)]
pub struct ComponentCostAccount {
    spec: ComponentSpec,
    model: FailureModel,
    table: Option<FailureTable>,
    options: AccountOptions,
    ledger: ComponentLedger,
    diagnostics: Vec<ConfigurationError>,
}

impl ComponentCostAccount {
    /// Project failures and costs for `spec` over the run horizon.
    ///
    /// # Errors
    /// Returns error for invalid run options only. Failure-model problems
    /// degrade the part to zero failures, and a non-finite repair cost to
    /// zero cost; both are reported by [`Self::diagnostics`].
    pub fn compute(spec: ComponentSpec, options: &AccountOptions) -> ComponentResult<Self> {
        options.validate()?;

        let mut diagnostics = Vec::new();
        let (mut model, issue) = FailureModel::resolve(&spec);
        diagnostics.extend(issue);

        let population = f64::from(spec.population);
        let mut table = None;
        if let FailureModel::Weibull { params } = model {
            match FailureTable::build(params, population, options.years, options.rounding) {
                Ok(t) => table = Some(t),
                Err(e) => {
                    model = FailureModel::ZERO;
                    diagnostics.push(ConfigurationError::InvalidWeibull {
                        key: spec.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let cost_per_event = match finite_cost_per_event(&spec) {
            Some(cost) => cost,
            None => {
                diagnostics.push(ConfigurationError::NonFiniteCost {
                    key: spec.key.clone(),
                });
                0.0
            }
        };

        for issue in &diagnostics {
            tracing::warn!(component = %spec.key, "{issue}");
        }

        let projected = match (&model, &table) {
            (_, Some(t)) => t.total().to_vec(),
            (FailureModel::ConstantRate { percent }, None) => {
                let per_year = population * percent / (options.years as f64 * 100.0);
                vec![per_year; options.years]
            }
            (FailureModel::Weibull { .. }, None) => vec![0.0; options.years],
        };

        let cumulative = cumulative_failures(&projected);
        let events = whole_events(&cumulative, options.drift_epsilon);
        let total_events = events.iter().sum();
        let cost = year_costs(&events, cost_per_event, options.escalation);

        tracing::debug!(
            component = %spec.key,
            total_events,
            cost_per_event,
            "component account computed"
        );

        Ok(Self {
            spec,
            model,
            table,
            options: *options,
            ledger: ComponentLedger {
                projected,
                cumulative,
                events,
                cost,
                total_events,
                cost_per_event,
            },
            diagnostics,
        })
    }

    /// New account with a crane override applied. Failure projections are
    /// reused; only the per-event and yearly costs change.
    pub fn with_crane_override(&self, crane_cost: f64) -> Self {
        let mut spec = self.spec.clone();
        spec.apply_crane_override(crane_cost);
        let mut diagnostics = self.diagnostics.clone();
        let cost_per_event = finite_cost_per_event(&spec).unwrap_or_else(|| {
            let issue = ConfigurationError::NonFiniteCost {
                key: spec.key.clone(),
            };
            if !diagnostics.contains(&issue) {
                tracing::warn!(component = %spec.key, "{issue}");
                diagnostics.push(issue);
            }
            0.0
        });
        let cost = year_costs(&self.ledger.events, cost_per_event, self.options.escalation);
        Self {
            spec,
            ledger: ComponentLedger {
                cost,
                cost_per_event,
                ..self.ledger.clone()
            },
            diagnostics,
            ..self.clone()
        }
    }

    pub fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    pub fn model(&self) -> FailureModel {
        self.model
    }

    pub fn failure_table(&self) -> Option<&FailureTable> {
        self.table.as_ref()
    }

    pub fn ledger(&self) -> &ComponentLedger {
        &self.ledger
    }

    pub fn diagnostics(&self) -> &[ConfigurationError] {
        &self.diagnostics
    }

    pub fn cost_per_event(&self) -> f64 {
        self.ledger.cost_per_event
    }

    pub fn total_events(&self) -> u64 {
        self.ledger.total_events
    }

    /// Median life of the Weibull model, if the part has one.
    pub fn median_life(&self) -> Option<f64> {
        self.model.weibull_params().map(|p| p.median_life())
    }
}

fn finite_cost_per_event(spec: &ComponentSpec) -> Option<f64> {
    ensure_finite(spec.cost_per_event(), "cost per event").ok()
}

fn year_costs(events: &[u64], cost_per_event: f64, escalation: f64) -> Vec<f64> {
    events
        .iter()
        .map(|&n| n as f64 * cost_per_event * escalation)
        .collect()
}

impl fmt::Display for ComponentCostAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.spec.key)?;
        writeln!(f, "YR    CummF   PFail  IncrF        CCost")?;
        let l = &self.ledger;
        for y in 0..l.projected.len() {
            writeln!(
                f,
                "{:2} {:8.2} {:7.2} {:6} {:12.2}",
                y + 1,
                l.cumulative[y],
                l.projected[y],
                l.events[y],
                l.cost[y]
            )?;
        }
        writeln!(
            f,
            "Events/{}yrs/Project: {}  (cost/event {:.2})",
            l.projected.len(),
            l.total_events,
            l.cost_per_event
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use om_core::ComponentKey;

    fn key() -> ComponentKey {
        ComponentKey::new("Rotor", "Pitch motor")
    }

    #[test]
    fn drift_does_not_lose_an_event() {
        let cumulative = cumulative_failures(&[0.6; 10]);
        let events = whole_events(&cumulative, DRIFT_EPSILON);
        assert_eq!(events.iter().sum::<u64>(), 6);

        let without = whole_events(&cumulative, 0.0);
        assert_eq!(without.iter().sum::<u64>(), 5);
    }

    #[test]
    fn first_year_just_below_whole_loses_that_event() {
        // Year one is floored without the offset; later years are differenced
        // against the offset floor, so the sub-epsilon shortfall is never recovered.
        let cumulative = [0.999_999_95, 1.5, 2.2];
        let events = whole_events(&cumulative, DRIFT_EPSILON);
        assert_eq!(events, vec![0, 0, 1]);
        let total: u64 = events.iter().sum();
        assert_eq!(total as f64, floor_with_drift(2.2, DRIFT_EPSILON) - 1.0);

        // Away from a whole number the plain identity holds.
        let events = whole_events(&[0.5, 1.5, 2.2], DRIFT_EPSILON);
        assert_eq!(events.iter().sum::<u64>() as f64, floor_with_drift(2.2, DRIFT_EPSILON));
    }

    #[test]
    fn constant_rate_reference_case() {
        let spec = ComponentSpec::constant_rate(key(), 6.0, 180);
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        let ledger = account.ledger();
        assert!(ledger.projected.iter().all(|p| (p - 0.54).abs() < 1e-12));
        assert!((ledger.cumulative[19] - 10.8).abs() < 1e-9);
        assert_eq!(account.total_events(), 10);
        assert!(account.diagnostics().is_empty());
    }

    #[test]
    fn weibull_account_uses_table_totals() {
        let spec = ComponentSpec::weibull(key(), 2.0, 10.0, 180);
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        let table = account.failure_table().unwrap();
        assert_eq!(account.ledger().projected, table.total());
        assert_eq!(account.ledger().events[0], 3);
        assert!(account.median_life().is_some());
    }

    #[test]
    fn year_cost_is_events_times_cost_per_event() {
        let spec = ComponentSpec::weibull(key(), 2.0, 10.0, 180);
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        let l = account.ledger();
        for y in 0..l.events.len() {
            assert_eq!(l.cost[y], l.events[y] as f64 * l.cost_per_event);
        }
    }

    #[test]
    fn escalation_scales_costs() {
        let spec = ComponentSpec::weibull(key(), 2.0, 10.0, 180);
        let base = ComponentCostAccount::compute(spec.clone(), &AccountOptions::default()).unwrap();
        let options = AccountOptions {
            escalation: 1.5,
            ..AccountOptions::default()
        };
        let escalated = ComponentCostAccount::compute(spec, &options).unwrap();
        for y in 0..20 {
            assert!((escalated.ledger().cost[y] - 1.5 * base.ledger().cost[y]).abs() < 1e-9);
        }
    }

    #[test]
    fn misconfigured_part_is_zero_cost_placeholder() {
        let mut spec = ComponentSpec::weibull(key(), 2.0, 10.0, 180);
        spec.weibull_shape = None;
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        assert_eq!(account.total_events(), 0);
        assert!(account.ledger().cost.iter().all(|c| *c == 0.0));
        assert_eq!(account.diagnostics().len(), 1);
        assert_eq!(account.model(), FailureModel::ZERO);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let spec = ComponentSpec::weibull(key(), 2.0, 10.0, 180);
        let options = AccountOptions {
            years: 0,
            ..AccountOptions::default()
        };
        assert!(ComponentCostAccount::compute(spec.clone(), &options).is_err());

        let options = AccountOptions {
            years: 200_000,
            ..AccountOptions::default()
        };
        assert!(matches!(
            ComponentCostAccount::compute(spec, &options),
            Err(ComponentError::InvalidArg { .. })
        ));
    }

    #[test]
    fn dump_lists_every_year() {
        let spec = ComponentSpec::constant_rate(key(), 6.0, 180);
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        let text = account.to_string();
        assert!(text.contains("Events/20yrs/Project: 10"));
        assert_eq!(text.lines().count(), 23);
    }

    #[test]
    fn non_finite_cost_degrades_to_zero_cost() {
        let mut spec = ComponentSpec::constant_rate(key(), 6.0, 180);
        spec.labor_hours = 1e308;
        spec.labor_rate = 18.9;
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        assert_eq!(account.cost_per_event(), 0.0);
        assert!(account.ledger().cost.iter().all(|c| *c == 0.0));
        // Failures are still projected.
        assert_eq!(account.total_events(), 10);
        assert!(matches!(
            account.diagnostics(),
            [ConfigurationError::NonFiniteCost { .. }]
        ));
    }

    #[test]
    fn crane_override_overflow_degrades_once() {
        let mut spec = ComponentSpec::constant_rate(key(), 6.0, 180);
        spec.part_cost = f64::MAX;
        let account = ComponentCostAccount::compute(spec, &AccountOptions::default()).unwrap();
        assert!(account.diagnostics().is_empty());

        let patched = account.with_crane_override(f64::MAX);
        assert_eq!(patched.cost_per_event(), 0.0);
        assert_eq!(patched.diagnostics().len(), 1);
        let again = patched.with_crane_override(f64::MAX);
        assert_eq!(again.diagnostics().len(), 1);
    }
}
