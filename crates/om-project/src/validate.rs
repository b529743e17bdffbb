//! Plant configuration validation.

use std::collections::HashSet;

use om_core::MAX_HORIZON_YEARS;

use crate::schema::{LATEST_VERSION, PlantConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Staffing role '{role}' has {len} headcount entries, horizon is {years} years")]
    StaffingTooShort {
        role: String,
        len: usize,
        years: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &PlantConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if config.horizon_years == 0 {
        return Err(invalid("horizon_years", 0, "must be at least one year"));
    }
    if config.horizon_years > MAX_HORIZON_YEARS {
        return Err(invalid(
            "horizon_years",
            config.horizon_years,
            &format!("must be at most {MAX_HORIZON_YEARS} years"),
        ));
    }
    if config.turbine_count == 0 {
        return Err(invalid("turbine_count", 0, "must be positive"));
    }
    positive("turbine_rating_kw", config.turbine_rating_kw)?;
    if !config.capacity_factor.is_finite()
        || config.capacity_factor <= 0.0
        || config.capacity_factor > 1.0
    {
        return Err(invalid(
            "capacity_factor",
            config.capacity_factor,
            "must be in (0, 1]",
        ));
    }
    for (field, value) in [
        ("consumables_per_turbine", config.consumables_per_turbine),
        ("site_maintenance", config.site_maintenance),
        ("equipment", config.equipment),
        ("burden", config.burden),
        ("escalation", config.escalation),
        ("numerics.drift_epsilon", config.numerics.drift_epsilon),
    ] {
        non_negative(field, value)?;
    }
    if let Some(rate) = config.labor_rate {
        non_negative("labor_rate", rate)?;
    }

    if let Some(roles) = &config.staffing {
        let mut names = HashSet::new();
        for role in roles {
            if !names.insert(role.role.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: role.role.clone(),
                    context: "staffing".to_string(),
                });
            }
            non_negative(&format!("staffing.{}.rate", role.role), role.rate)?;
            if role.headcount.len() < config.horizon_years {
                return Err(ValidationError::StaffingTooShort {
                    role: role.role.clone(),
                    len: role.headcount.len(),
                    years: config.horizon_years,
                });
            }
            if let Some(n) = role.headcount.iter().find(|n| !n.is_finite() || **n < 0.0) {
                return Err(invalid(
                    &format!("staffing.{}.headcount", role.role),
                    n,
                    "must be non-negative",
                ));
            }
        }
    }

    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be non-negative"));
    }
    Ok(())
}
