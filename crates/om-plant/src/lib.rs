//! Plant-level O&M cost aggregation.
//!
//! Provides:
//! - Plant parameters and named staffing tables
//! - Parallel computation of component cost accounts (fan-out)
//! - [`PlantLedger`]: annual cost categories and their unit views (fan-in)
//!
//! # Example
//!
//! ```
//! use om_components::{AccountOptions, ComponentSpec};
//! use om_core::ComponentKey;
//! use om_plant::{CostCategory, PlantParams, StaffingTable, UnitView, aggregate, compute_accounts};
//!
//! let params = PlantParams::default();
//! let staffing = StaffingTable::gec_default(params.years);
//! let specs = vec![ComponentSpec::weibull(ComponentKey::new("Rotor", "Pitch gear"), 2.0, 10.0, 180)];
//! let accounts = compute_accounts(specs, &AccountOptions::default()).unwrap();
//! let ledger = aggregate(&params, &staffing, &accounts).unwrap();
//!
//! let table = ledger.view(UnitView::PerTurbine);
//! assert_eq!(table.row(CostCategory::Total).len(), 20);
//! ```

pub mod aggregate;
pub mod error;
pub mod ledger;
pub mod params;
pub mod staffing;

pub use aggregate::{Execution, aggregate, compute_accounts, compute_accounts_with};
pub use error::{PlantError, PlantResult};
pub use ledger::{CostCategory, LedgerTable, PlantLedger, UnitView};
pub use params::PlantParams;
pub use staffing::{HOURS_PER_WORK_YEAR, RoleClass, StaffRole, StaffingTable, TechnicianGrade};
