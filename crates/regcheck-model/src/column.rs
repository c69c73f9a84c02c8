#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// A spreadsheet column letter (`A`, `Z`, `AA`, `AC`, ...).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnLetter(String);

impl ColumnLetter {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim().to_ascii_uppercase();
        if column_index(&trimmed).is_none() {
            return Err(ModelError::InvalidColumnLetter(value));
        }
        Ok(Self(trimmed))
    }

    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zero-based column index (`A` = 0).
    pub fn index(&self) -> usize {
        // Validated at construction.
        column_index(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for ColumnLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ColumnLetter {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnLetter> for String {
    fn from(value: ColumnLetter) -> Self {
        value.0
    }
}

/// Base-26 decoding of a column letter: `A` = 0, `Z` = 25, `AA` = 26.
///
/// Case-insensitive. Returns `None` for an empty string, non-letters, or
/// values that would overflow `usize`.
pub fn column_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return None;
    }
    let mut acc: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc - 1)
}
