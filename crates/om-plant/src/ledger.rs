//! Annual plant cost tables and their unit views.

use std::collections::BTreeMap;
use std::fmt;

use om_core::{annual_energy, as_kwh, kw};
use serde::{Deserialize, Serialize};

/// Cost rows of the annual O&M table, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    PartsReplacement,
    Consumables,
    SalariedLabor,
    WageLabor,
    SiteMaintenance,
    Equipment,
    Total,
}

impl CostCategory {
    /// Categories that add up to [`CostCategory::Total`].
    pub const PARTS: [CostCategory; 6] = [
        CostCategory::PartsReplacement,
        CostCategory::Consumables,
        CostCategory::SalariedLabor,
        CostCategory::WageLabor,
        CostCategory::SiteMaintenance,
        CostCategory::Equipment,
    ];

    pub const ALL: [CostCategory; 7] = [
        CostCategory::PartsReplacement,
        CostCategory::Consumables,
        CostCategory::SalariedLabor,
        CostCategory::WageLabor,
        CostCategory::SiteMaintenance,
        CostCategory::Equipment,
        CostCategory::Total,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CostCategory::PartsReplacement => "Parts Replacement",
            CostCategory::Consumables => "Consumables",
            CostCategory::SalariedLabor => "Salaried Labor",
            CostCategory::WageLabor => "Wage-based Labor",
            CostCategory::SiteMaintenance => "Site Maintenance",
            CostCategory::Equipment => "Equipment",
            CostCategory::Total => "Total",
        }
    }
}

/// Units a ledger can be reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitView {
    /// USD per year for the whole project
    Project,
    /// USD per turbine per year
    PerTurbine,
    /// USD per installed kW per year
    PerKw,
    /// US cents per kWh generated
    CentsPerKwh,
}

impl UnitView {
    pub const ALL: [UnitView; 4] = [
        UnitView::Project,
        UnitView::PerTurbine,
        UnitView::PerKw,
        UnitView::CentsPerKwh,
    ];

    pub fn title(self) -> &'static str {
        match self {
            UnitView::Project => "Total Project $/year",
            UnitView::PerTurbine => "$/Turbine/year",
            UnitView::PerKw => "$/kW/year",
            UnitView::CentsPerKwh => "\u{a2}/kWh",
        }
    }

    fn decimals(self) -> usize {
        match self {
            UnitView::Project | UnitView::PerTurbine => 0,
            UnitView::PerKw => 2,
            UnitView::CentsPerKwh => 4,
        }
    }
}

/// Absolute annual plant costs (USD), one series per category.
///
/// Built by [`crate::aggregate`] once every component account exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantLedger {
    years: usize,
    turbine_count: u32,
    turbine_rating_kw: f64,
    capacity_factor: f64,
    series: BTreeMap<CostCategory, Vec<f64>>,
    system_parts: BTreeMap<String, Vec<f64>>,
}

impl PlantLedger {
    pub(crate) fn new(
        years: usize,
        turbine_count: u32,
        turbine_rating_kw: f64,
        capacity_factor: f64,
        parts: [Vec<f64>; 6],
        system_parts: BTreeMap<String, Vec<f64>>,
    ) -> Self {
        let series = CostCategory::PARTS.into_iter().zip(parts).collect();
        Self {
            years,
            turbine_count,
            turbine_rating_kw,
            capacity_factor,
            series,
            system_parts,
        }
    }

    pub fn years(&self) -> usize {
        self.years
    }

    pub fn turbine_count(&self) -> u32 {
        self.turbine_count
    }

    /// Absolute series for a category; `Total` is not stored, use [`Self::view`].
    pub fn absolute(&self, category: CostCategory) -> Option<&[f64]> {
        self.series.get(&category).map(Vec::as_slice)
    }

    /// Parts replacement cost per system (USD/year).
    pub fn system_parts(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.system_parts
    }

    /// Divisor turning an absolute USD amount into `view` units.
    pub fn divisor(&self, view: UnitView) -> f64 {
        let turbines = f64::from(self.turbine_count);
        match view {
            UnitView::Project => 1.0,
            UnitView::PerTurbine => turbines,
            UnitView::PerKw => self.turbine_rating_kw * turbines,
            UnitView::CentsPerKwh => {
                let energy = annual_energy(kw(self.turbine_rating_kw * turbines), self.capacity_factor);
                as_kwh(energy) / 100.0
            }
        }
    }

    /// Category rows converted to `view`, with a Total row summed from the
    /// converted rows.
    pub fn view(&self, view: UnitView) -> LedgerTable {
        let divisor = self.divisor(view);
        let mut rows = Vec::with_capacity(CostCategory::ALL.len());
        let mut total = vec![0.0; self.years];
        for category in CostCategory::PARTS {
            let converted: Vec<f64> = self
                .series
                .get(&category)
                .map(|s| s.iter().map(|v| v / divisor).collect())
                .unwrap_or_else(|| vec![0.0; self.years]);
            for (t, v) in total.iter_mut().zip(&converted) {
                *t += v;
            }
            rows.push((category, converted));
        }
        rows.push((CostCategory::Total, total));
        LedgerTable { view, rows }
    }
}

/// One unit view of a [`PlantLedger`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerTable {
    pub view: UnitView,
    pub rows: Vec<(CostCategory, Vec<f64>)>,
}

impl LedgerTable {
    pub fn row(&self, category: CostCategory) -> &[f64] {
        self.rows
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, r)| r.as_slice())
            .unwrap_or(&[])
    }
}

impl fmt::Display for LedgerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.view.decimals();
        let years = self.rows.first().map(|(_, r)| r.len()).unwrap_or(0);
        writeln!(f, "{}", self.view.title())?;
        write!(f, "{:<18}", "Year")?;
        for y in 1..=years {
            write!(f, " {:>10}", y)?;
        }
        writeln!(f)?;
        for (category, row) in &self.rows {
            write!(f, "{:<18}", category.label())?;
            for v in row {
                write!(f, " {:>10.*}", decimals, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_ledger() -> PlantLedger {
        let years = 3;
        let parts = [
            vec![1000.0, 2000.0, 3000.0],
            vec![600.0; years],
            vec![500.0; years],
            vec![400.0; years],
            vec![300.0; years],
            vec![200.0; years],
        ];
        PlantLedger::new(years, 10, 2000.0, 0.5, parts, BTreeMap::new())
    }

    #[test]
    fn total_row_sums_categories_in_every_view() {
        let ledger = flat_ledger();
        for view in UnitView::ALL {
            let table = ledger.view(view);
            let total = table.row(CostCategory::Total);
            for y in 0..3 {
                let sum: f64 = CostCategory::PARTS
                    .iter()
                    .map(|c| table.row(*c)[y])
                    .sum();
                assert!((total[y] - sum).abs() <= 1e-12 * sum.abs().max(1.0));
            }
        }
    }

    #[test]
    fn divisors_follow_unit_definitions() {
        let ledger = flat_ledger();
        assert_eq!(ledger.divisor(UnitView::Project), 1.0);
        assert_eq!(ledger.divisor(UnitView::PerTurbine), 10.0);
        assert_eq!(ledger.divisor(UnitView::PerKw), 20_000.0);
        let kwh = 20_000.0 * 8760.0 * 0.5;
        assert!((ledger.divisor(UnitView::CentsPerKwh) - kwh / 100.0).abs() < 1e-6);
    }

    #[test]
    fn views_do_not_alter_absolute_series() {
        let ledger = flat_ledger();
        let _ = ledger.view(UnitView::CentsPerKwh);
        assert_eq!(
            ledger.absolute(CostCategory::PartsReplacement).unwrap(),
            &[1000.0, 2000.0, 3000.0]
        );
        assert!(ledger.absolute(CostCategory::Total).is_none());
    }

    #[test]
    fn table_renders_all_rows() {
        let text = flat_ledger().view(UnitView::PerKw).to_string();
        assert!(text.starts_with("$/kW/year"));
        for category in CostCategory::ALL {
            assert!(text.contains(category.label()));
        }
    }
}
