//! Named staffing tables: role → per-year headcount.

use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};

/// Paid hours in a work year; converts hourly wages to annual cost.
pub const HOURS_PER_WORK_YEAR: f64 = 2080.0;

/// Pay basis of a role. Determines which labor row the cost lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleClass {
    /// `rate` is an annual salary
    Salaried,
    /// `rate` is an hourly wage
    Hourly,
}

impl RoleClass {
    /// Factor converting `rate` to a cost per person-year.
    pub fn multiplier(self) -> f64 {
        match self {
            RoleClass::Salaried => 1.0,
            RoleClass::Hourly => HOURS_PER_WORK_YEAR,
        }
    }
}

/// Technician grade, used to derive the repair labor rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicianGrade {
    Senior,
    Junior,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffRole {
    pub role: String,
    pub class: RoleClass,
    /// Salary (USD/year) or wage (USD/hour) depending on `class`
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<TechnicianGrade>,
    /// Headcount for each project year
    pub headcount: Vec<f64>,
}

impl StaffRole {
    /// Burdened cost of one person in this role for a year.
    pub fn cost_per_head(&self, burden: f64) -> f64 {
        self.class.multiplier() * (1.0 + burden) * self.rate
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingTable {
    pub roles: Vec<StaffRole>,
}

impl StaffingTable {
    /// The GEC baseline crew for a 60-turbine plant: one site manager, two
    /// administrative assistants, two senior technicians rising to three
    /// after year 10, and four junior technicians rising to six after
    /// year 5 and eight after year 15. Headcounts past year 20 repeat the
    /// year-20 crew.
    pub fn gec_default(years: usize) -> Self {
        let stepped = |steps: &[(usize, f64)]| -> Vec<f64> {
            (0..years)
                .map(|y| {
                    steps
                        .iter()
                        .rev()
                        .find(|(from, _)| y >= *from)
                        .map(|(_, n)| *n)
                        .unwrap_or(0.0)
                })
                .collect()
        };
        Self {
            roles: vec![
                StaffRole {
                    role: "Site Manager".to_string(),
                    class: RoleClass::Salaried,
                    rate: 85_000.0,
                    technician: None,
                    headcount: stepped(&[(0, 1.0)]),
                },
                StaffRole {
                    role: "Admin. Asst.".to_string(),
                    class: RoleClass::Salaried,
                    rate: 35_000.0,
                    technician: None,
                    headcount: stepped(&[(0, 2.0)]),
                },
                StaffRole {
                    role: "Sr. Technician".to_string(),
                    class: RoleClass::Hourly,
                    rate: 18.0,
                    technician: Some(TechnicianGrade::Senior),
                    headcount: stepped(&[(0, 2.0), (10, 3.0)]),
                },
                StaffRole {
                    role: "Jr. Technician".to_string(),
                    class: RoleClass::Hourly,
                    rate: 12.0,
                    technician: Some(TechnicianGrade::Junior),
                    headcount: stepped(&[(0, 4.0), (5, 6.0), (15, 8.0)]),
                },
            ],
        }
    }

    pub fn validate(&self, years: usize) -> PlantResult<()> {
        for role in &self.roles {
            if role.headcount.len() < years {
                return Err(PlantError::StaffingTooShort {
                    role: role.role.clone(),
                    len: role.headcount.len(),
                    years,
                });
            }
            if !role.rate.is_finite() || role.rate < 0.0 {
                return Err(PlantError::InvalidArg {
                    what: "staff rate must be non-negative",
                });
            }
            if role.headcount.iter().any(|n| !n.is_finite() || *n < 0.0) {
                return Err(PlantError::InvalidArg {
                    what: "headcount must be non-negative",
                });
            }
        }
        Ok(())
    }

    /// Annual cost of every role in `class`, summed per year.
    pub fn labor_series(&self, class: RoleClass, burden: f64, years: usize) -> Vec<f64> {
        let mut series = vec![0.0; years];
        for role in self.roles.iter().filter(|r| r.class == class) {
            let per_head = role.cost_per_head(burden);
            for (y, slot) in series.iter_mut().enumerate() {
                *slot += role.headcount.get(y).copied().unwrap_or(0.0) * per_head;
            }
        }
        series
    }

    /// Burdened repair labor rate (USD/hour): a crew of two junior
    /// technicians per senior technician.
    ///
    /// Returns `None` when the table has no senior or no junior technician.
    pub fn technician_labor_rate(&self, burden: f64) -> Option<f64> {
        let wage = |grade| {
            self.roles
                .iter()
                .find(|r| r.technician == Some(grade))
                .map(|r| r.rate)
        };
        let senior = wage(TechnicianGrade::Senior)?;
        let junior = wage(TechnicianGrade::Junior)?;
        Some((2.0 * junior + senior) / 3.0 * (1.0 + burden))
    }
}
