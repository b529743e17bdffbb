use thiserror::Error;

pub type OmResult<T> = Result<T, OmError>;

#[derive(Error, Debug)]
pub enum OmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
