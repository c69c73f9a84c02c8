//! Registry matrix to candidate list.

use chrono::{Duration, NaiveDate};
use regcheck_model::{
    CellValue, ColumnLetter, ColumnMap, HeaderRules, MatchKeys, RegistryCandidate, RegistryMatrix,
};
use regcheck_normalize::{TextNormalizer, first_number_run, postal_code_from_cell};
use tracing::{debug, warn};

use crate::header::{HeaderDetection, detect_header};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Spreadsheet serial day numbers accepted as dates (1900-01-01 ..= 9999-12-31).
const SERIAL_DATE_RANGE: std::ops::RangeInclusive<i64> = 1..=2_958_465;

/// Turns the raw matrix of one registry source into normalized candidates.
#[derive(Debug, Clone, Copy)]
pub struct RegistryTableLoader<'a> {
    columns: &'a ColumnMap,
    header: &'a HeaderRules,
    normalizer: &'a TextNormalizer,
}

/// Candidates of one source plus how its header was found.
#[derive(Debug, Clone)]
pub struct LoadedRegistry {
    pub source_name: String,
    pub detection: HeaderDetection,
    pub candidates: Vec<RegistryCandidate>,
}

impl<'a> RegistryTableLoader<'a> {
    pub fn new(
        columns: &'a ColumnMap,
        header: &'a HeaderRules,
        normalizer: &'a TextNormalizer,
    ) -> Self {
        Self {
            columns,
            header,
            normalizer,
        }
    }

    /// Data body: every non-blank row after the detected header row.
    ///
    /// Empty when no header row was found.
    pub fn body<'m>(
        &self,
        matrix: &'m RegistryMatrix,
    ) -> (HeaderDetection, Vec<&'m [CellValue]>) {
        let detection = detect_header(&matrix.rows, self.header, self.normalizer);
        let body = match detection.body_start() {
            Some(start) => matrix
                .rows
                .iter()
                .skip(start)
                .filter(|row| !row.iter().all(CellValue::is_blank))
                .map(Vec::as_slice)
                .collect(),
            None => Vec::new(),
        };
        (detection, body)
    }

    /// Loads all candidates of `matrix`. Never fails: missing columns yield
    /// empty fields and an unrecognizable sheet yields no candidates.
    pub fn load(&self, matrix: &RegistryMatrix) -> LoadedRegistry {
        let (detection, body) = self.body(matrix);
        if detection.row.is_none() && !matrix.rows.is_empty() {
            warn!(
                source = %matrix.name,
                scanned = detection.row_hits.len(),
                "no header row found; source yields no candidates"
            );
        }
        let candidates: Vec<RegistryCandidate> = body
            .iter()
            .enumerate()
            .map(|(idx, row)| self.candidate(&matrix.name, idx, row))
            .collect();
        debug!(
            source = %matrix.name,
            header_row = ?detection.row,
            candidates = candidates.len(),
            "registry loaded"
        );
        LoadedRegistry {
            source_name: matrix.name.clone(),
            detection,
            candidates,
        }
    }

    fn candidate(&self, source: &str, body_index: usize, row: &[CellValue]) -> RegistryCandidate {
        let cell = |letter: &ColumnLetter| row.get(letter.index()).unwrap_or(&EMPTY_CELL);
        let columns = self.columns;

        let name = cell(&columns.name).as_text();
        let via = cell(&columns.via).as_text();
        let number = cell(&columns.number).as_text();
        let municipality = cell(&columns.municipality).as_text();

        let keys = MatchKeys {
            name: name
                .as_deref()
                .map(|v| self.normalizer.normalize(v))
                .unwrap_or_default(),
            street_core: via
                .as_deref()
                .map(|v| self.normalizer.street_core(v))
                .unwrap_or_default(),
            municipality: municipality
                .as_deref()
                .map(|v| self.normalizer.normalize(v))
                .unwrap_or_default(),
            postal_code: postal_code_from_cell(cell(&columns.postal_code)),
            house_number: number
                .as_deref()
                .and_then(|v| first_number_run(&self.normalizer.normalize(v))),
        };

        RegistryCandidate {
            source_name: source.to_string(),
            body_index,
            name,
            via,
            number,
            municipality,
            center_code: cell(&columns.center_code).as_text(),
            last_authorization_date: authorization_date(cell(&columns.authorization_date)),
            service_offering: cell(&columns.service_offering).as_text(),
            keys,
        }
    }
}

/// Authorization date as text.
///
/// Spreadsheet serial day numbers (as numbers, or as a bare 5-digit string
/// from a CSV export) become ISO `YYYY-MM-DD`; other text is kept trimmed.
pub fn authorization_date(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Number(serial) if serial.fract() == 0.0 => {
            serial_to_iso(*serial as i64).or_else(|| cell.as_text())
        }
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.len() == 5 && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
                cell.as_number()
                    .and_then(|serial| serial_to_iso(serial as i64))
                    .or_else(|| cell.as_text())
            } else {
                cell.as_text()
            }
        }
        _ => cell.as_text(),
    }
}

fn serial_to_iso(serial: i64) -> Option<String> {
    if !SERIAL_DATE_RANGE.contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::days(serial))?;
    Some(date.format("%Y-%m-%d").to_string())
}
