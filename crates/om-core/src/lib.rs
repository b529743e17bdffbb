//! om-core: stable foundation for the wind plant O&M engine.
//!
//! Contains:
//! - units (uom power/energy types + constructors)
//! - numeric (Real + legacy float helpers)
//! - keys (system/component catalog keys)
//! - error (shared error types)

pub mod error;
pub mod keys;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{OmError, OmResult};
pub use keys::*;
pub use numeric::*;
pub use units::*;
