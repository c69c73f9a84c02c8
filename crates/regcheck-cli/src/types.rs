use std::path::PathBuf;

use regcheck_model::MatchOutput;
use regcheck_report::ReportPaths;

#[derive(Debug)]
pub struct MatchRunResult {
    pub output: MatchOutput,
    pub output_dir: PathBuf,
    /// `None` on a dry run.
    pub reports: Option<ReportPaths>,
    pub sources: Vec<SourceSummary>,
}

#[derive(Debug)]
pub struct SourceSummary {
    pub name: String,
    pub rows: usize,
}
