//! Error types for text normalization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// An abbreviation pattern from the configuration does not compile.
    #[error("invalid abbreviation pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
