//! Statistical lifetime models for replaceable wind turbine parts.
//!
//! This crate evaluates the two-parameter Weibull failure density and builds
//! multi-generation failure tables: the original install fails along the
//! Weibull curve, and every year's failures become a replacement cohort that
//! starts aging along the same curve.

pub mod error;
pub mod failure_table;
pub mod weibull;

pub use error::{ReliabilityError, ReliabilityResult};
pub use failure_table::{CellRounding, FailureTable};
pub use weibull::{WeibullParams, weibull_density};
