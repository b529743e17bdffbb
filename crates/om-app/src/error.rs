//! Error types for the om-app service layer.

/// Application error wrapping the backend crates' errors for front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Configuration validation failed: {0}")]
    Validation(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Computation error: {0}")]
    Compute(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for om-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<om_project::ProjectError> for AppError {
    fn from(err: om_project::ProjectError) -> Self {
        match err {
            om_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<om_plant::PlantError> for AppError {
    fn from(err: om_plant::PlantError) -> Self {
        AppError::Compute(err.to_string())
    }
}

impl From<om_components::ComponentError> for AppError {
    fn from(err: om_components::ComponentError) -> Self {
        AppError::Compute(err.to_string())
    }
}

impl From<om_results::ResultsError> for AppError {
    fn from(err: om_results::ResultsError) -> Self {
        match err {
            om_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
