//! Keyword-based header row detection.
//!
//! Registry exports from different regions and years carry a varying number
//! of title and metadata rows above the real header, so the header is
//! located by content instead of by a fixed row index.

use regcheck_model::{CellValue, HeaderRules};
use regcheck_normalize::TextNormalizer;
use tracing::debug;

/// Outcome of header detection for one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDetection {
    /// Index of the chosen header row, `None` when no scanned row contains
    /// any keyword.
    pub row: Option<usize>,
    /// Keyword hits of the chosen row.
    pub hits: usize,
    /// Keyword hits of every scanned row, in row order.
    pub row_hits: Vec<usize>,
}

impl HeaderDetection {
    /// Index of the first data row, if a header was found.
    pub fn body_start(&self) -> Option<usize> {
        self.row.map(|row| row + 1)
    }
}

/// Scans at most `rules.scan_limit` rows and picks the one with the most
/// keyword occurrences. Ties keep the earliest row.
pub fn detect_header(
    rows: &[Vec<CellValue>],
    rules: &HeaderRules,
    normalizer: &TextNormalizer,
) -> HeaderDetection {
    let keywords: Vec<String> = rules
        .keywords
        .iter()
        .map(|keyword| normalizer.normalize(keyword))
        .filter(|keyword| !keyword.is_empty())
        .collect();

    let row_hits: Vec<usize> = rows
        .iter()
        .take(rules.scan_limit)
        .map(|row| keyword_hits(&row_text(row, normalizer), &keywords))
        .collect();

    let mut best: Option<(usize, usize)> = None;
    for (idx, &hits) in row_hits.iter().enumerate() {
        if hits == 0 {
            continue;
        }
        if best.is_none_or(|(_, best_hits)| hits > best_hits) {
            best = Some((idx, hits));
        }
    }

    debug!(
        scanned = row_hits.len(),
        header_row = ?best.map(|(idx, _)| idx),
        hits = best.map_or(0, |(_, hits)| hits),
        "header detection"
    );

    HeaderDetection {
        row: best.map(|(idx, _)| idx),
        hits: best.map_or(0, |(_, hits)| hits),
        row_hits,
    }
}

fn row_text(row: &[CellValue], normalizer: &TextNormalizer) -> String {
    row.iter()
        .filter_map(CellValue::as_text)
        .map(|text| normalizer.normalize(&text))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn keyword_hits(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .map(|keyword| text.matches(keyword.as_str()).count())
        .sum()
}
