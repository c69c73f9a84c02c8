use std::path::Path;

use anyhow::{Context, Result};
use regcheck_model::{MatchRecord, TopCandidate};
use serde::Serialize;

/// Writes `records` as CSV with a header row taken from their serde field
/// names. Missing values become empty cells; an empty slice yields an
/// empty file.
pub fn write_records_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

pub fn write_matches_csv(path: &Path, matches: &[MatchRecord]) -> Result<()> {
    write_records_csv(path, matches)
}

pub fn write_top3_csv(path: &Path, top3: &[TopCandidate]) -> Result<()> {
    write_records_csv(path, top3)
}
