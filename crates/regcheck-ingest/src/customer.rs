//! Customer rows to [`CustomerRecord`]s, with the up-front schema check.

use std::collections::BTreeSet;

use regcheck_model::{CellValue, CustomerFields, CustomerRecord, CustomerRow, MatchKeys};
use regcheck_normalize::{TextNormalizer, extract_house_number, postal_code_from_cell};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Actual column names (as spelled in the input) for each logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub id: Option<String>,
    pub names: Vec<String>,
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

/// Resolves the configured field names against the columns present in any
/// row. Matching is trimmed and ASCII case-insensitive.
///
/// Fails with [`IngestError::MissingField`] naming the first required field
/// that no row carries.
pub fn resolve_columns(rows: &[CustomerRow], fields: &CustomerFields) -> Result<ResolvedColumns> {
    let present: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();
    let find = |wanted: &str| {
        present
            .iter()
            .find(|column| column.trim().eq_ignore_ascii_case(wanted.trim()))
            .map(|column| (*column).to_string())
    };
    let require = |wanted: &str| {
        find(wanted).ok_or_else(|| IngestError::MissingField {
            field: wanted.to_string(),
            present: present.iter().map(|c| (*c).to_string()).collect(),
        })
    };

    let mut names = Vec::with_capacity(fields.names.len());
    for (idx, wanted) in fields.names.iter().enumerate() {
        if idx == 0 {
            names.push(require(wanted.as_str())?);
        } else if let Some(column) = find(wanted.as_str()) {
            names.push(column);
        }
    }
    Ok(ResolvedColumns {
        id: fields.id.as_deref().and_then(find),
        names,
        street: require(fields.street.as_str())?,
        city: require(fields.city.as_str())?,
        postal_code: require(fields.postal_code.as_str())?,
    })
}

/// Builds one [`CustomerRecord`] per input row.
///
/// An empty input yields no records. A required column missing from the
/// whole input aborts with a schema error; missing values on single rows
/// only leave the corresponding keys empty.
pub fn build_customer_records(
    rows: &[CustomerRow],
    fields: &CustomerFields,
    normalizer: &TextNormalizer,
) -> Result<Vec<CustomerRecord>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let columns = resolve_columns(rows, fields)?;
    debug!(?columns, rows = rows.len(), "customer columns resolved");

    let records = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| customer_record(row_index, row, &columns, normalizer))
        .collect();
    Ok(records)
}

fn customer_record(
    row_index: usize,
    row: &CustomerRow,
    columns: &ResolvedColumns,
    normalizer: &TextNormalizer,
) -> CustomerRecord {
    let text = |column: &str| row.get(column).and_then(CellValue::as_text);

    let display_name = columns
        .names
        .iter()
        .filter_map(|column| text(column.as_str()))
        .collect::<Vec<_>>()
        .join(" ");
    let street = text(columns.street.as_str()).unwrap_or_default();
    let city = text(columns.city.as_str()).unwrap_or_default();
    let postal_cell = row.get(columns.postal_code.as_str());

    let keys = MatchKeys {
        name: normalizer.normalize(&display_name),
        street_core: normalizer.street_core(&street),
        municipality: normalizer.normalize(&city),
        postal_code: postal_cell.and_then(postal_code_from_cell),
        house_number: extract_house_number(&street),
    };

    CustomerRecord {
        row_index,
        customer_id: columns.id.as_deref().and_then(text),
        display_name,
        street,
        city,
        postal_raw: postal_cell.map(CellValue::to_text).unwrap_or_default(),
        keys,
    }
}
