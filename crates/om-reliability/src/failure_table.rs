//! Multi-generation failure table.

use std::fmt;

use om_core::{MAX_HORIZON_YEARS, round_to_tenths};

use crate::error::{ReliabilityError, ReliabilityResult};
use crate::weibull::WeibullParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How table cells are stored before they are folded into totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellRounding {
    /// Keep full precision.
    #[default]
    Exact,
    /// Round every cell to one decimal place, emulating the GEC O&M
    /// spreadsheet. Totals are summed from the rounded cells.
    Tenths,
}

impl CellRounding {
    fn apply(self, v: f64) -> f64 {
        match self {
            CellRounding::Exact => v,
            CellRounding::Tenths => round_to_tenths(v),
        }
    }
}

/// Expected fractional failures by replacement generation and project year.
///
/// Generation 0 is the original install. Generation `g > 0` is the batch of
/// replacement parts installed for the failures of year `g - 1`; it starts
/// aging in year `g`, so its cells for earlier years are absent.
///
/// ## Layout
///
/// Cells live in a generation-major arena of `generations * years` slots:
///
/// ```text
/// cell(g, y) = cells[g * years + y]      None when y < g
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FailureTable {
    params: WeibullParams,
    years: usize,
    generations: usize,
    rounding: CellRounding,
    cells: Vec<Option<f64>>,
    parts_affected: Vec<f64>,
    fail_per_gen: Vec<f64>,
    total: Vec<f64>,
}

impl FailureTable {
    /// Build the table for `population` original parts over `years` years.
    ///
    /// # Errors
    /// Returns error if the population is negative or non-finite, or the
    /// horizon is zero or longer than [`MAX_HORIZON_YEARS`].
    pub fn build(
        params: WeibullParams,
        population: f64,
        years: usize,
        rounding: CellRounding,
    ) -> ReliabilityResult<Self> {
        if !population.is_finite() || population < 0.0 {
            return Err(ReliabilityError::InvalidPopulation { value: population });
        }
        if years == 0 || years > MAX_HORIZON_YEARS {
            return Err(ReliabilityError::InvalidHorizon { years });
        }

        // The last year's failures are never replaced inside the horizon.
        let generations = years.saturating_sub(1).max(1);

        let mut cells = vec![None; generations * years];
        let mut parts_affected = vec![0.0; generations];
        let mut fail_per_gen = vec![0.0; generations];
        let mut total = vec![0.0; years];

        for g in 0..generations {
            // total[g - 1] is final here: only generations <= g - 1 reach year g - 1.
            parts_affected[g] = if g == 0 { population } else { total[g - 1] };

            for y in g..years {
                let age = (y - g + 1) as f64;
                let value = rounding.apply(parts_affected[g] * params.density(age));
                cells[g * years + y] = Some(value);
                total[y] += value;
                fail_per_gen[g] += value;
            }
        }

        Ok(Self {
            params,
            years,
            generations,
            rounding,
            cells,
            parts_affected,
            fail_per_gen,
            total,
        })
    }

    pub fn params(&self) -> WeibullParams {
        self.params
    }

    pub fn years(&self) -> usize {
        self.years
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn rounding(&self) -> CellRounding {
        self.rounding
    }

    /// Expected failures of generation `g` in year `y`; `None` before the
    /// generation exists or outside the table.
    pub fn cell(&self, g: usize, y: usize) -> Option<f64> {
        if g >= self.generations || y >= self.years {
            return None;
        }
        self.cells[g * self.years + y]
    }

    /// Population entering each generation.
    pub fn parts_affected(&self) -> &[f64] {
        &self.parts_affected
    }

    /// Expected failures per generation over the whole horizon.
    pub fn fail_per_generation(&self) -> &[f64] {
        &self.fail_per_gen
    }

    /// Expected failures per year, summed over generations.
    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// Mean of the defined cells in year `y` (0 if there are none).
    pub fn column_average(&self, y: usize) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for g in 0..self.generations {
            if let Some(v) = self.cell(g, y) {
                sum += v;
                count += 1;
            }
        }
        if count > 0 { sum / count as f64 } else { 0.0 }
    }
}

impl fmt::Display for FailureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Failure table (k={}, c={}, {} years)",
            self.params.shape(),
            self.params.scale(),
            self.years
        )?;
        for g in 0..self.generations {
            write!(f, "G{:02} {:>8.2} |", g + 1, self.parts_affected[g])?;
            for y in 0..self.years {
                match self.cell(g, y) {
                    Some(v) => write!(f, " {:6.2}", v)?,
                    None => write!(f, "       ")?,
                }
            }
            writeln!(f, " | {:7.2}", self.fail_per_gen[g])?;
        }
        write!(f, "{:<13}|", "Total")?;
        for v in &self.total {
            write!(f, " {:6.2}", v)?;
        }
        writeln!(f)?;
        write!(f, "{:<13}|", "Avg")?;
        for y in 0..self.years {
            write!(f, " {:6.2}", self.column_average(y))?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_table(rounding: CellRounding) -> FailureTable {
        let params = WeibullParams::new(2.0, 10.0).unwrap();
        FailureTable::build(params, 180.0, 20, rounding).unwrap()
    }

    #[test]
    fn first_year_total_is_generation_zero_only() {
        let table = reference_table(CellRounding::Exact);
        assert!((table.total()[0] - 3.564).abs() < 1e-3);
        assert_eq!(table.cell(1, 0), None);
        assert_eq!(table.generations(), 19);
    }

    #[test]
    fn replacement_generation_population_is_previous_year_total() {
        let table = reference_table(CellRounding::Exact);
        for g in 1..table.generations() {
            assert_eq!(table.parts_affected()[g], table.total()[g - 1]);
        }
        // Generation 1 starts at age 1 in year 1.
        let expected = table.total()[0] * table.params().density(1.0);
        assert!((table.cell(1, 1).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn totals_match_cells() {
        let table = reference_table(CellRounding::Exact);
        let by_year: f64 = table.total().iter().sum();
        let by_gen: f64 = table.fail_per_generation().iter().sum();
        assert!((by_year - by_gen).abs() < 1e-9);
    }

    #[test]
    fn rounded_cells_feed_totals() {
        let table = reference_table(CellRounding::Tenths);
        for y in 0..table.years() {
            let mut sum = 0.0;
            for g in 0..table.generations() {
                if let Some(v) = table.cell(g, y) {
                    assert_eq!(v, round_to_tenths(v));
                    sum += v;
                }
            }
            assert_eq!(sum, table.total()[y]);
        }
        assert_eq!(table.total()[0], 3.6);
    }

    #[test]
    fn column_average_counts_defined_cells() {
        let table = reference_table(CellRounding::Exact);
        assert_eq!(table.column_average(0), table.total()[0]);
        let avg = table.column_average(2);
        assert!((avg - table.total()[2] / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_year_horizon_keeps_original_generation() {
        let params = WeibullParams::new(2.0, 10.0).unwrap();
        let table = FailureTable::build(params, 10.0, 1, CellRounding::Exact).unwrap();
        assert_eq!(table.generations(), 1);
        assert!(table.total()[0] > 0.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        let params = WeibullParams::new(2.0, 10.0).unwrap();
        assert!(FailureTable::build(params, -1.0, 20, CellRounding::Exact).is_err());
        assert!(FailureTable::build(params, 10.0, 0, CellRounding::Exact).is_err());
        assert_eq!(
            FailureTable::build(params, 10.0, 200_000, CellRounding::Exact).unwrap_err(),
            ReliabilityError::InvalidHorizon { years: 200_000 }
        );
        let longest = FailureTable::build(params, 10.0, MAX_HORIZON_YEARS, CellRounding::Exact);
        assert_eq!(longest.unwrap().years(), MAX_HORIZON_YEARS);
    }

    #[test]
    fn display_has_total_row() {
        let table = reference_table(CellRounding::Exact);
        let text = table.to_string();
        assert!(text.contains("Total"));
        assert!(text.contains("G01"));
        let avg = text.lines().last().unwrap();
        assert!(avg.starts_with("Avg"));
        assert_eq!(avg.split('|').nth(1).unwrap().split_whitespace().count(), 20);
        assert!(avg.contains(&format!("{:6.2}", table.column_average(2))));
    }
}
