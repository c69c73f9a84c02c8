//! Report generation for match results.
//!
//! - **JSON**: the whole [`MatchOutput`] (`result.json`)
//! - **CSV**: one file of best matches (`matches.csv`) and one of the top-3
//!   shortlist (`top3.csv`); column names are the `MIN_*` / `CAND_*` field
//!   names of the records

mod csv_out;
mod json;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regcheck_model::MatchOutput;

pub use csv_out::{write_matches_csv, write_records_csv, write_top3_csv};
pub use json::write_json;

pub const MATCHES_FILE: &str = "matches.csv";
pub const TOP3_FILE: &str = "top3.csv";
pub const RESULT_FILE: &str = "result.json";

/// Which report files to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    #[default]
    Both,
}

impl ReportFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

/// Paths of the files written by [`write_reports`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: Option<PathBuf>,
    pub matches_csv: Option<PathBuf>,
    pub top3_csv: Option<PathBuf>,
}

impl ReportPaths {
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        [&self.json, &self.matches_csv, &self.top3_csv]
            .into_iter()
            .filter_map(|path| path.as_deref())
    }
}

/// Writes the selected reports into `output_dir`, creating it if needed.
pub fn write_reports(
    output_dir: &Path,
    output: &MatchOutput,
    format: ReportFormat,
) -> Result<ReportPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let mut paths = ReportPaths::default();
    if format.includes_json() {
        let path = output_dir.join(RESULT_FILE);
        write_json(&path, output)?;
        paths.json = Some(path);
    }
    if format.includes_csv() {
        let path = output_dir.join(MATCHES_FILE);
        write_matches_csv(&path, &output.matches)?;
        paths.matches_csv = Some(path);

        let path = output_dir.join(TOP3_FILE);
        write_top3_csv(&path, &output.top3)?;
        paths.top3_csv = Some(path);
    }
    Ok(paths)
}
