//! Registry matching engine.
//!
//! Given customer rows and the raw matrices of one or more registry sources,
//! [`MatchEngine::run`] produces a [`MatchOutput`](regcheck_model::MatchOutput):
//!
//! 1. each source is loaded once (header detection, column mapping);
//! 2. each customer is blocked against the source by postal code, then
//!    municipality, then a capped scan;
//! 3. every blocked candidate is scored and the best one tiered;
//! 4. the combined records are sorted and summarized.
//!
//! # Example
//!
//! ```ignore
//! use regcheck_match::MatchEngine;
//! use regcheck_model::MatchConfig;
//!
//! let engine = MatchEngine::new(MatchConfig::default())?;
//! let output = engine.run(&customers, &sources)?;
//! println!("{} ALTA", output.summary.tiers.alta);
//! ```

mod aggregate;
mod blocking;
mod engine;
mod error;
mod score;
mod similarity;

pub use aggregate::{aggregate, summarize};
pub use blocking::{Block, BlockKind, BlockingIndex};
pub use engine::{MatchEngine, SourceMatches, TOP_CANDIDATES};
pub use error::{MatchError, Result};
pub use score::{ProfiledKeys, ScoreBreakdown, ScoreComponent, Scorer};
pub use similarity::{
    TextProfile, fuzzy, fuzzy_text, token_set_similarity, trigram_similarity,
};
