//! Engine configuration.
//!
//! Every constant the matcher depends on (thresholds, weights, word lists,
//! abbreviation table, header keywords, column letters, blocking cap and the
//! customer schema) lives here. The engine receives one immutable
//! [`MatchConfig`] at construction. Every field has a default, so a JSON
//! file may override only the parts it cares about.

use serde::{Deserialize, Serialize};

use crate::column::ColumnLetter;
use crate::error::{ModelError, Result};
use crate::tier::Thresholds;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub thresholds: Thresholds,
    pub weights: ScoreWeights,
    pub text: TextRules,
    pub header: HeaderRules,
    pub columns: ColumnMap,
    pub blocking: BlockingRules,
    pub customer: CustomerFields,
}

impl MatchConfig {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.weights.validate()?;
        if self.header.scan_limit == 0 {
            return Err(ModelError::ZeroScanLimit);
        }
        let names = self.customer.names.len();
        if !(1..=3).contains(&names) {
            return Err(ModelError::NameFieldCount(names));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Weights of the similarity components and the additive bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub name: f64,
    pub street: f64,
    pub postal_code: f64,
    pub house_number: f64,
    pub municipality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: 0.50,
            street: 0.35,
            postal_code: 0.35,
            house_number: 0.25,
            municipality: 0.10,
        }
    }
}

impl ScoreWeights {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("name", self.name),
            ("street", self.street),
            ("postal_code", self.postal_code),
            ("house_number", self.house_number),
            ("municipality", self.municipality),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// One abbreviation expansion: a regex applied to upper-cased,
/// diacritic-free text and its replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    pub pattern: String,
    pub replacement: String,
}

impl Abbreviation {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Word lists and the abbreviation table used by text normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRules {
    pub stop_words: Vec<String>,
    pub via_words: Vec<String>,
    /// Applied in order; longer forms must precede their prefixes.
    pub abbreviations: Vec<Abbreviation>,
}

const STOP_WORDS: &[&str] = &[
    "DE", "DEL", "LA", "EL", "LOS", "LAS", "Y", "EN", "A", "UN", "UNA", "UNOS", "UNAS", "POR",
    "PARA", "AL", "LO", "DA", "DO",
];

const VIA_WORDS: &[&str] = &[
    "CALLE",
    "AVENIDA",
    "AV",
    "AVDA",
    "PASEO",
    "PSO",
    "PS",
    "PLAZA",
    "CARRETERA",
    "CTRA",
    "PARTIDA",
    "PTDA",
    "CAMINO",
    "CNO",
    "TRAVESIA",
    "TV",
    "RONDA",
];

const ABBREVIATIONS: &[(&str, &str)] = &[
    (r"\bHOSP\b\.?", "HOSPITAL"),
    (r"\bCTRA\b\.?", "CARRETERA"),
    (r"\bAVDA\b\.?", "AVENIDA"),
    (r"\bAV\b\.?", "AVENIDA"),
    (r"\bC/", "CALLE "),
    (r"\bCL\b\.?", "CALLE"),
    (r"\bPZA\b\.?", "PLAZA"),
    (r"\bPSO\b\.?", "PASEO"),
    (r"\bPTDA\b\.?", "PARTIDA"),
    (r"\bCNO\b\.?", "CAMINO"),
    (r"\bTRAV\b\.?", "TRAVESIA"),
    (r"\bCTRO\b\.?", "CENTRO"),
    (r"\bNTRA\b\.?", "NUESTRA"),
    (r"\bSRA\b\.?", "SENORA"),
    (r"\bSTA\b\.?", "SANTA"),
    (r"\bSTO\b\.?", "SANTO"),
    (r"\bDR\b\.?", "DOCTOR"),
    (r"\bS\.\s+", "SAN "),
    (r"\bS\.([A-Z]{2,})\b", "SAN $1"),
];

impl Default for TextRules {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            via_words: VIA_WORDS.iter().map(|w| (*w).to_string()).collect(),
            abbreviations: ABBREVIATIONS
                .iter()
                .map(|(pattern, replacement)| Abbreviation::new(*pattern, *replacement))
                .collect(),
        }
    }
}

/// Header-row detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderRules {
    /// Keywords counted in each candidate row; normalized before use.
    pub keywords: Vec<String>,
    /// Only the first `scan_limit` rows are considered.
    pub scan_limit: usize,
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self {
            keywords: [
                "nombre",
                "centro",
                "municipio",
                "provincia",
                "comunidad",
                "postal",
                "dirección",
                "vía",
                "número",
            ]
            .iter()
            .map(|w| (*w).to_string())
            .collect(),
            scan_limit: 30,
        }
    }
}

/// Column letter of each registry field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub name: ColumnLetter,
    pub via: ColumnLetter,
    pub municipality: ColumnLetter,
    pub postal_code: ColumnLetter,
    pub number: ColumnLetter,
    pub center_code: ColumnLetter,
    pub authorization_date: ColumnLetter,
    pub service_offering: ColumnLetter,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            name: ColumnLetter::from_static("E"),
            via: ColumnLetter::from_static("M"),
            municipality: ColumnLetter::from_static("K"),
            postal_code: ColumnLetter::from_static("O"),
            number: ColumnLetter::from_static("N"),
            center_code: ColumnLetter::from_static("C"),
            authorization_date: ColumnLetter::from_static("Y"),
            service_offering: ColumnLetter::from_static("AC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingRules {
    /// Maximum candidates scored when neither postal code nor municipality
    /// narrows the pool.
    pub fallback_cap: usize,
}

impl Default for BlockingRules {
    fn default() -> Self {
        Self { fallback_cap: 4000 }
    }
}

/// Names of the customer input columns. Lookup is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerFields {
    /// Optional identifier column.
    pub id: Option<String>,
    /// Up to three name/info columns, concatenated into the display name.
    /// The first one is required.
    pub names: Vec<String>,
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

impl Default for CustomerFields {
    fn default() -> Self {
        Self {
            id: Some("Customer".to_string()),
            names: vec![
                "Name".to_string(),
                "Name 2".to_string(),
                "Name 3".to_string(),
            ],
            street: "STREET".to_string(),
            city: "CITY".to_string(),
            postal_code: "PostalCode".to_string(),
        }
    }
}

impl CustomerFields {
    /// Columns that must be present somewhere in the customer set.
    pub fn required(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.names.first().map(String::as_str).into_iter().collect();
        fields.extend([
            self.street.as_str(),
            self.city.as_str(),
            self.postal_code.as_str(),
        ]);
        fields
    }
}
