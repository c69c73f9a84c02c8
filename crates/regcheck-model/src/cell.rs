#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

/// A single spreadsheet cell.
///
/// Registry exports mix strings, numbers and blanks at arbitrary positions,
/// so every field access coerces explicitly through the helpers below.
/// Serialized untagged: `null`, a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `Empty` and for text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Renders the cell as trimmed text; blanks become `None`.
    ///
    /// Integral numbers render without a fractional part (`2.0` -> `"2"`).
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(value) => Some(format_number(*value)),
        }
    }

    /// Same as [`as_text`](Self::as_text) but blanks become an empty string.
    pub fn to_text(&self) -> String {
        self.as_text().unwrap_or_default()
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok(),
            Self::Empty => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One customer input row: column name to cell.
pub type CustomerRow = BTreeMap<String, CellValue>;

/// Raw 2-D matrix for one registry source, exactly as read from the sheet.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegistryMatrix {
    /// Label used for `MIN_source` / `sourceName`.
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl RegistryMatrix {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
