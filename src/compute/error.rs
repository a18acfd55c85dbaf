use thiserror::Error;

/// Every failure the engine can surface to its host.
///
/// The first three are the structural data problems a host is expected to
/// translate for the user; the rest guard the API contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Division by zero: {divisor} is zero")]
    DivisionByZero { divisor: String },
    #[error("Singular matrix: (I - C) of dimension {dimension} is not invertible")]
    SingularMatrix { dimension: usize },
    #[error("Structural mismatch: {msg}")]
    DimensionMismatch { msg: String },
    #[error("Demand shock is the zero vector; no scenario to model")]
    ZeroShock,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ModelError::InvalidSelection(msg.into())
    }

    pub fn mismatch(msg: impl Into<String>) -> Self {
        ModelError::DimensionMismatch { msg: msg.into() }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
