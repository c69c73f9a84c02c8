//! Data model for reconciling a customer roster against official registries
//! of healthcare establishments.

pub mod cell;
pub mod column;
pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod tier;

pub use cell::{CellValue, CustomerRow, RegistryMatrix};
pub use column::{ColumnLetter, column_index};
pub use config::{
    Abbreviation, BlockingRules, ColumnMap, CustomerFields, HeaderRules, MatchConfig,
    ScoreWeights, TextRules,
};
pub use error::{ModelError, Result};
pub use output::{MatchOutput, MatchRecord, Summary, TierCounts, TopCandidate, round_score};
pub use record::{CustomerRecord, MatchKeys, RegistryCandidate};
pub use tier::{Thresholds, Tier};
