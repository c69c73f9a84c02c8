use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid column letter '{0}' (expected A..Z, AA..ZZ, ...)")]
    InvalidColumnLetter(String),

    #[error("invalid thresholds: expected 0 <= baja ({baja}) < alta ({alta}) <= 1")]
    InvalidThresholds { alta: f64, baja: f64 },

    #[error("invalid weight '{name}': {value} (weights must be finite and non-negative)")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("header scan limit must be at least 1")]
    ZeroScanLimit,

    #[error("customer schema needs at least one and at most three name fields, got {0}")]
    NameFieldCount(usize),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
