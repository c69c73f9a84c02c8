//! Errors returned by the match engine.

use regcheck_ingest::IngestError;
use regcheck_model::ModelError;
use regcheck_normalize::NormalizeError;
use thiserror::Error;

/// The only error type [`MatchEngine`](crate::MatchEngine) returns.
///
/// Degraded sources and incomplete rows are absorbed into the output; only
/// invalid configuration and customer schema errors end a run.
#[derive(Debug, Error)]
pub enum MatchError {
    // === Configuration ===
    #[error("invalid configuration: {0}")]
    Config(#[from] ModelError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    // === Input ===
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, MatchError>;
