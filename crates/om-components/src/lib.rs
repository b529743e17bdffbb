//! Replaceable-part cost accounts.
//!
//! A [`ComponentSpec`] describes one catalog line (a part type across the
//! whole plant). [`ComponentCostAccount::compute`] turns it into a
//! year-by-year ledger of whole repair events and repair costs.
//!
//! Misconfigured parts never fail the computation: they degrade to a
//! zero-failure model and carry a [`ConfigurationError`] diagnostic.

pub mod account;
pub mod diagnostic;
pub mod error;
pub mod model;
pub mod spec;

pub use account::{
    AccountOptions, ComponentCostAccount, ComponentLedger, cumulative_failures, whole_events,
};
pub use diagnostic::ConfigurationError;
pub use error::{ComponentError, ComponentResult};
pub use model::FailureModel;
pub use om_reliability::{CellRounding, FailureTable, WeibullParams};
pub use spec::{ComponentSpec, DEFAULT_CRANE_COST, PredictionTag};
