//! Numeric extractors for street numbers and postal codes.

use std::sync::LazyLock;

use regcheck_model::CellValue;
use regex::Regex;

/// A 1-4 digit number at the end of the string, optionally preceded by a
/// comma and optionally followed by one letter (`Mayor, 23B`).
static TRAILING_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s,])([0-9]{1,4})\s*[A-Za-z]?\s*$").expect("Invalid trailing number regex")
});

/// A number after an explicit marker (`nº 5`, `num. 12`, `número 3`).
static MARKED_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:n[º°o]|numero|número|num)\.?\s*([0-9]{1,4})\b")
        .expect("Invalid marked number regex")
});

static POSTAL_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{5}").expect("Invalid postal code regex"));

static NUMBER_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,4}").expect("Invalid number run regex"));

/// House number from a raw street string.
///
/// Trailing numbers win (the usual Spanish `Calle Mayor 12`); explicit
/// markers are the fallback. Only the digits are returned.
pub fn extract_house_number(raw_street: &str) -> Option<String> {
    let street = raw_street.trim();
    TRAILING_NUMBER_REGEX
        .captures(street)
        .or_else(|| MARKED_NUMBER_REGEX.captures(street))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First run of exactly five digits anywhere in `text`.
pub fn extract_postal_code(text: &str) -> Option<String> {
    POSTAL_CODE_REGEX
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// Postal code from a spreadsheet cell.
///
/// Numeric cells that lost their leading zero (`6600`) are padded back to
/// five digits before the search.
pub fn postal_code_from_cell(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Number(value)
            if value.fract() == 0.0 && (0.0..100_000.0).contains(value) =>
        {
            Some(format!("{:05}", *value as u32))
        }
        other => other.as_text().and_then(|text| extract_postal_code(&text)),
    }
}

/// First run of 1-4 digits; the registry-side house number rule.
pub fn first_number_run(text: &str) -> Option<String> {
    NUMBER_RUN_REGEX.find(text).map(|m| m.as_str().to_string())
}
