//! File readers for registry matrices and customer rows.
//!
//! CSV files are read verbatim (no header handling for registries, since
//! header detection happens later on the matrix). JSON files hold either an
//! array of arrays (registry) or an array of objects (customers).

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use regcheck_model::{CellValue, CustomerRow, RegistryMatrix};
use tracing::debug;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Csv,
    Json,
}

fn file_kind(path: &Path) -> FileKind {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => FileKind::Json,
        _ => FileKind::Csv,
    }
}

fn normalize_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(trimmed)
    }
}

/// Picks `;`, tab or `,` by counting them in the first non-empty line.
/// Spanish spreadsheet exports default to `;`.
fn sniff_delimiter(contents: &str) -> u8 {
    let first = contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    [b';', b'\t', b',']
        .into_iter()
        .max_by_key(|delim| first.bytes().filter(|b| b == delim).count())
        .filter(|delim| first.as_bytes().contains(delim))
        .unwrap_or(b',')
}

fn read_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Registry exports are often Latin-1; keep going with replacement chars.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(BufReader::new(file))
}

/// Reads a raw registry matrix. Rows keep their original width.
pub fn read_matrix(path: &Path) -> Result<Vec<Vec<CellValue>>> {
    let rows: Vec<Vec<CellValue>> = match file_kind(path) {
        FileKind::Json => serde_json::from_reader(open(path)?).map_err(|source| {
            IngestError::JsonParse {
                path: path.to_path_buf(),
                source,
            }
        })?,
        FileKind::Csv => {
            let contents = read_to_string(path)?;
            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .delimiter(sniff_delimiter(&contents))
                .from_reader(contents.as_bytes());
            let mut rows = Vec::new();
            for record in reader.records() {
                let record = record.map_err(|source| IngestError::CsvParse {
                    path: path.to_path_buf(),
                    source,
                })?;
                rows.push(record.iter().map(normalize_cell).collect());
            }
            rows
        }
    };
    debug!(path = %path.display(), rows = rows.len(), "matrix read");
    Ok(rows)
}

/// Reads a registry matrix and labels it. The label defaults to the file
/// stem.
pub fn load_registry(path: &Path, label: Option<&str>) -> Result<RegistryMatrix> {
    let name = label
        .map(str::to_string)
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| path.display().to_string());
    Ok(RegistryMatrix::new(name, read_matrix(path)?))
}

/// Reads customer rows from a headed CSV file or a JSON array of objects.
///
/// Fully blank CSV records are skipped.
pub fn read_customers(path: &Path) -> Result<Vec<CustomerRow>> {
    let rows: Vec<CustomerRow> = match file_kind(path) {
        FileKind::Json => serde_json::from_reader(open(path)?).map_err(|source| {
            IngestError::JsonParse {
                path: path.to_path_buf(),
                source,
            }
        })?,
        FileKind::Csv => {
            let contents = read_to_string(path)?;
            let mut reader = ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .delimiter(sniff_delimiter(&contents))
                .from_reader(contents.as_bytes());
            let csv_err = |source| IngestError::CsvParse {
                path: path.to_path_buf(),
                source,
            };
            let headers: Vec<String> = reader
                .headers()
                .map_err(csv_err)?
                .iter()
                .map(|h| h.trim().trim_matches('\u{feff}').trim().to_string())
                .collect();
            let mut rows = Vec::new();
            for record in reader.records() {
                let record = record.map_err(csv_err)?;
                if record.iter().all(|value| value.trim().is_empty()) {
                    continue;
                }
                let row: CustomerRow = headers
                    .iter()
                    .zip(record.iter())
                    .filter(|(header, _)| !header.is_empty())
                    .map(|(header, value)| (header.clone(), normalize_cell(value)))
                    .collect();
                rows.push(row);
            }
            rows
        }
    };
    debug!(path = %path.display(), rows = rows.len(), "customers read");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_semicolon_exports() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(sniff_delimiter("a,b\n"), b',');
        assert_eq!(sniff_delimiter("\n\na\tb\n"), b'\t');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn blank_cells_become_empty() {
        assert_eq!(normalize_cell("  "), CellValue::Empty);
        assert_eq!(normalize_cell("\u{feff}Nombre"), CellValue::text("Nombre"));
    }

    #[test]
    fn json_extension_is_case_insensitive() {
        assert_eq!(file_kind(Path::new("a/B.JSON")), FileKind::Json);
        assert_eq!(file_kind(Path::new("a/b.csv")), FileKind::Csv);
        assert_eq!(file_kind(Path::new("a/b")), FileKind::Csv);
    }
}
